//! Tessera Runtime - server-side composition for Tessera
//!
//! This crate resolves component references into descriptors, composes view
//! templates into markup and renders the payloads the client renderer
//! inserts into the page.

pub mod catalog;
pub mod config;
pub mod context;
pub mod directive;
pub mod resolver;
pub mod service;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use tessera_core::{ClientSettings, InstanceId, RenderRequest, ERROR_COMPONENT_ID};
use tessera_policy::{AuthorizationGate, ConditionRegistry};

use crate::catalog::{CatalogLoader, InMemoryCatalog};
use crate::config::RuntimeConfig;
use crate::resolver::ComponentResolver;
use crate::service::RenderService;

/// Runtime facade that wires the catalog, the authorization gate and the
/// render service together.
pub struct Runtime {
    /// Runtime configuration
    config: RuntimeConfig,

    /// Render service over the loaded catalog
    service: Arc<RenderService<InMemoryCatalog>>,
}

impl Runtime {
    /// Load the configuration from the provided path or defaults and create
    /// a runtime from it.
    pub async fn load(config_path: Option<&str>) -> Result<Self> {
        let config = RuntimeConfig::load(config_path).await?;
        Self::new(config).await
    }

    /// Create a new Runtime instance
    pub async fn new(config: RuntimeConfig) -> Result<Self> {
        info!("Initializing Tessera Runtime");
        config.validate()?;

        let catalog = CatalogLoader::new(&config.components_directory)
            .load()
            .await?;
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create a runtime over an already populated catalog.
    pub fn with_catalog(config: RuntimeConfig, catalog: InMemoryCatalog) -> Self {
        let conditions = ConditionRegistry::from_names(&config.conditions);
        info!(conditions = ?conditions.names(), "Authorization gate ready");

        let resolver = ComponentResolver::new(catalog, AuthorizationGate::new(conditions));
        let service = Arc::new(RenderService::new(resolver, config.async_children));

        Self { config, service }
    }

    /// The runtime configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The loaded catalog.
    pub fn catalog(&self) -> &InMemoryCatalog {
        self.service.resolver().catalog()
    }

    /// The component resolver.
    pub fn resolver(&self) -> &ComponentResolver<InMemoryCatalog> {
        self.service.resolver()
    }

    /// The render service, shareable with transport tasks.
    pub fn service(&self) -> Arc<RenderService<InMemoryCatalog>> {
        Arc::clone(&self.service)
    }

    /// The settings the client renderer needs before its first request.
    ///
    /// The placeholder is rendered once, bound to the nil instance id; the
    /// client rebinds it to each instance it stands in for.
    pub fn client_settings(&self) -> ClientSettings {
        let placeholder = self.config.placeholder.as_ref().and_then(|placeholder| {
            let request = RenderRequest {
                id: Some(placeholder.id.clone()),
                version: placeholder.version.clone(),
                view: Some(placeholder.view.clone()),
                instance_id: Some(InstanceId::nil()),
                placeholder: false,
            };
            let payload = self.service.handle(&request, None);
            if payload.id == ERROR_COMPONENT_ID {
                warn!(
                    placeholder = %placeholder.id,
                    controller = %payload.controller,
                    "Placeholder component could not be rendered"
                );
                return None;
            }
            Some(payload)
        });

        ClientSettings {
            placeholder_timeout_ms: self.config.placeholder_timeout_ms,
            placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ComponentCatalog, ComponentMeta, ViewMeta};
    use crate::config::PlaceholderConfig;

    fn catalog() -> InMemoryCatalog {
        let catalog = InMemoryCatalog::new();
        catalog
            .insert(
                ComponentMeta::new("placeholder", "1.0")
                    .with_css("/placeholder/1.0/spinner.css")
                    .with_view("index", ViewMeta::new().with_template("<div class=\"spinner\"></div>")),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn test_client_settings_render_placeholder() {
        let config = RuntimeConfig {
            placeholder_timeout_ms: 300,
            placeholder: Some(PlaceholderConfig {
                id: "placeholder".to_string(),
                version: None,
                view: "index".to_string(),
            }),
            ..RuntimeConfig::default()
        };
        let runtime = Runtime::with_catalog(config, catalog());

        let settings = runtime.client_settings();

        assert_eq!(settings.placeholder_timeout_ms, 300);
        let placeholder = settings.placeholder.unwrap();
        assert!(placeholder.instance_id.is_nil());
        assert_eq!(placeholder.html, "<div class=\"spinner\"></div>");
        assert_eq!(placeholder.css, vec!["/placeholder/1.0/spinner.css"]);
    }

    #[test]
    fn test_unknown_placeholder_is_dropped() {
        let config = RuntimeConfig {
            placeholder: Some(PlaceholderConfig {
                id: "missing".to_string(),
                version: None,
                view: "index".to_string(),
            }),
            ..RuntimeConfig::default()
        };
        let runtime = Runtime::with_catalog(config, catalog());

        assert!(runtime.client_settings().placeholder.is_none());
    }
}
