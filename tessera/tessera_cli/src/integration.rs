//! Integration with the Tessera runtime
//!
//! This module builds the runtime and the request session the commands work
//! with.

use anyhow::{Context, Result};
use tokio::fs;
use tracing::debug;

use tessera_core::Session;
use tessera_runtime::config::RuntimeConfig;
use tessera_runtime::Runtime;

/// Load the runtime configuration, point it at a components directory and
/// load the catalog.
pub async fn load_runtime(components: &str, config_path: Option<&str>) -> Result<Runtime> {
    let mut config = RuntimeConfig::load(config_path).await?;
    config.components_directory = components.to_string();

    Runtime::new(config)
        .await
        .context(format!("Failed to load components from {}", components))
}

/// Read a session from a JSON file. Without a file the request is anonymous.
pub async fn load_session(path: Option<&str>) -> Result<Option<Session>> {
    let Some(path) = path else {
        return Ok(None);
    };

    debug!("Loading session from {}", path);
    let content = fs::read_to_string(path)
        .await
        .context(format!("Failed to read session file: {}", path))?;
    let session = serde_json::from_str(&content)
        .context(format!("Failed to parse session file: {}", path))?;

    Ok(Some(session))
}
