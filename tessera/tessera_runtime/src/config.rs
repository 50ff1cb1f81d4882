//! Configuration for Tessera Runtime
//!
//! Handles loading and managing runtime configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

use tessera_core::ClientSettings;

/// Errors that can occur in configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// The component shown while a requested instance is on its way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderConfig {
    /// Component id
    pub id: String,

    /// Component version, latest when absent
    #[serde(default)]
    pub version: Option<String>,

    /// View name
    #[serde(default = "default_placeholder_view")]
    pub view: String,
}

fn default_placeholder_view() -> String {
    "index".to_string()
}

/// Runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Components directory
    #[serde(default = "default_components_directory")]
    pub components_directory: String,

    /// Milliseconds the client waits before showing the placeholder
    #[serde(default = "default_placeholder_timeout_ms")]
    pub placeholder_timeout_ms: u64,

    /// Placeholder component
    #[serde(default)]
    pub placeholder: Option<PlaceholderConfig>,

    /// Enabled dynamic conditions
    #[serde(default = "default_conditions")]
    pub conditions: Vec<String>,

    /// Whether declared children are delivered asynchronously and race the
    /// placeholder
    #[serde(default = "default_async_children")]
    pub async_children: bool,
}

fn default_components_directory() -> String {
    "./components".to_string()
}

fn default_placeholder_timeout_ms() -> u64 {
    ClientSettings::default().placeholder_timeout_ms
}

fn default_conditions() -> Vec<String> {
    vec!["country".to_string(), "language".to_string()]
}

fn default_async_children() -> bool {
    true
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            components_directory: default_components_directory(),
            placeholder_timeout_ms: default_placeholder_timeout_ms(),
            placeholder: None,
            conditions: default_conditions(),
            async_children: default_async_children(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a file
    pub async fn load(path: Option<&str>) -> Result<Self> {
        let mut config = RuntimeConfig::default();

        if let Some(path) = path {
            info!("Loading configuration from {}", path);

            if !Path::new(path).exists() {
                warn!("Configuration file not found: {}", path);
                return Ok(config);
            }

            let content = fs::read_to_string(path)
                .await
                .map_err(|e| ConfigError::LoadFailed(e.to_string()))
                .context(format!("Failed to read configuration file: {}", path))?;

            config = serde_json::from_str(&content)
                .context(format!("Failed to parse configuration file: {}", path))?;
        } else {
            info!("No configuration file specified, using defaults");
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.components_directory.is_empty() {
            return Err(
                ConfigError::Invalid("Components directory cannot be empty".to_string()).into(),
            );
        }

        if self.placeholder_timeout_ms == 0 {
            return Err(
                ConfigError::Invalid("Placeholder timeout cannot be zero".to_string()).into(),
            );
        }

        if let Some(placeholder) = &self.placeholder {
            if placeholder.id.is_empty() || placeholder.view.is_empty() {
                return Err(ConfigError::Invalid(
                    "Placeholder needs a component id and a view".to_string(),
                )
                .into());
            }
        }

        if self.conditions.is_empty() {
            warn!("No dynamic conditions enabled, every conditional scope will be denied");
        }

        Ok(())
    }
}
