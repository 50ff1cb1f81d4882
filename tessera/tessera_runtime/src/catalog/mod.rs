//! Component catalog.
//!
//! The catalog holds the metadata of every known component version. It is
//! filled once at startup and only read while pages are composed, so
//! lookups from concurrent requests need no coordination.

mod in_memory;
mod loader;

pub use in_memory::InMemoryCatalog;
pub use loader::CatalogLoader;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use tessera_core::error::{CatalogError, Result};
use tessera_core::{ComponentIdentity, Version};
use tessera_policy::{DynamicCondition, Guarded, Scope};

/// Metadata of one component version, as declared in its `meta.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentMeta {
    /// Component id.
    pub id: String,

    /// Component version.
    pub version: String,

    /// Stylesheets every view of the component depends on.
    #[serde(default)]
    pub css: Vec<String>,

    /// Permissions required to use the component.
    #[serde(default)]
    pub permissions: Vec<String>,

    /// Dynamic conditions required to use the component.
    #[serde(default)]
    pub dynamic_conditions: Vec<DynamicCondition>,

    /// Views by name.
    #[serde(default)]
    pub views: BTreeMap<String, ViewMeta>,
}

impl ComponentMeta {
    /// Create a component without views or requirements.
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            css: Vec::new(),
            permissions: Vec::new(),
            dynamic_conditions: Vec::new(),
            views: BTreeMap::new(),
        }
    }

    /// Add a view.
    pub fn with_view(mut self, name: impl Into<String>, view: ViewMeta) -> Self {
        self.views.insert(name.into(), view);
        self
    }

    /// Add a stylesheet.
    pub fn with_css(mut self, url: impl Into<String>) -> Self {
        self.css.push(url.into());
        self
    }

    /// Require a permission.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    /// Require a dynamic condition.
    pub fn with_condition(mut self, condition: DynamicCondition) -> Self {
        self.dynamic_conditions.push(condition);
        self
    }

    /// The parsed version.
    pub fn parsed_version(&self) -> Result<Version> {
        Version::from_str(&self.version)
            .map_err(|e| CatalogError::InvalidVersion(e.to_string()).into())
    }

    /// The component's id and version.
    pub fn identity(&self) -> ComponentIdentity {
        ComponentIdentity::new(self.id.clone(), self.version.clone())
    }

    /// A view together with the component it belongs to.
    pub fn view<'a>(&'a self, name: &'a str) -> Option<GuardedView<'a>> {
        self.views.get(name).map(|view| GuardedView {
            component: self,
            name,
            view,
        })
    }
}

impl Guarded for ComponentMeta {
    fn scope(&self) -> Scope {
        Scope::Component {
            id: self.id.clone(),
            version: self.version.clone(),
        }
    }

    fn required_permissions(&self) -> &[String] {
        &self.permissions
    }

    fn dynamic_conditions(&self) -> &[DynamicCondition] {
        &self.dynamic_conditions
    }
}

/// Metadata of one view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewMeta {
    /// Client controller script, `<view>.js` when absent.
    #[serde(default)]
    pub controller: Option<String>,

    /// Permissions required to use the view.
    #[serde(default)]
    pub permissions: Vec<String>,

    /// Dynamic conditions required to use the view.
    #[serde(default)]
    pub dynamic_conditions: Vec<DynamicCondition>,

    /// Markup of the view, possibly containing component directives.
    #[serde(default)]
    pub template: Option<String>,
}

impl ViewMeta {
    /// Create an unrestricted view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the controller script.
    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    /// Require a permission.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    /// Require a dynamic condition.
    pub fn with_condition(mut self, condition: DynamicCondition) -> Self {
        self.dynamic_conditions.push(condition);
        self
    }

    /// Set the markup.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

/// A view seen through the component that declares it.
#[derive(Debug, Clone, Copy)]
pub struct GuardedView<'a> {
    /// The declaring component.
    pub component: &'a ComponentMeta,

    /// The view name.
    pub name: &'a str,

    /// The view metadata.
    pub view: &'a ViewMeta,
}

impl GuardedView<'_> {
    /// The controller script of the view.
    pub fn controller(&self) -> String {
        self.view
            .controller
            .clone()
            .unwrap_or_else(|| format!("{}.js", self.name))
    }

    /// The markup of the view.
    pub fn template(&self) -> &str {
        self.view.template.as_deref().unwrap_or("")
    }
}

impl Guarded for GuardedView<'_> {
    fn scope(&self) -> Scope {
        Scope::View {
            id: self.component.id.clone(),
            version: self.component.version.clone(),
            view: self.name.to_string(),
        }
    }

    fn required_permissions(&self) -> &[String] {
        &self.view.permissions
    }

    fn dynamic_conditions(&self) -> &[DynamicCondition] {
        &self.view.dynamic_conditions
    }
}

/// Trait for component catalogs.
pub trait ComponentCatalog: Send + Sync {
    /// Add a component version.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the version was added.
    /// * `Err` - If the version is invalid or already catalogued.
    fn insert(&self, meta: ComponentMeta) -> Result<()>;

    /// Get a specific version of a component. Versions match by value, so
    /// `1.0` finds `1.0.0`.
    fn get(&self, id: &str, version: &str) -> Option<Arc<ComponentMeta>>;

    /// Get the highest version of a component.
    fn latest(&self, id: &str) -> Option<Arc<ComponentMeta>>;

    /// The declared versions of a component, lowest first.
    fn versions(&self, id: &str) -> Vec<String>;

    /// Every catalogued component version.
    fn list(&self) -> Vec<Arc<ComponentMeta>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_controller() {
        let meta = ComponentMeta::new("button", "1.0")
            .with_view("index", ViewMeta::new())
            .with_view("restricted", ViewMeta::new().with_controller("index.js"));

        assert_eq!(meta.view("index").unwrap().controller(), "index.js");
        assert_eq!(meta.view("restricted").unwrap().controller(), "index.js");
        assert!(meta.view("missing").is_none());
    }

    #[test]
    fn test_meta_from_json() {
        let meta: ComponentMeta = serde_json::from_str(
            r#"{
                "id": "button",
                "version": "2.0",
                "css": ["/button/2.0/button.css"],
                "dynamic_conditions": [{"condition": "country", "allowed": ["US"]}],
                "views": {
                    "index": {
                        "dynamic_conditions": [{"condition": "language", "allowed": ["en_US"]}]
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(meta.identity().to_string(), "button@2.0");
        assert_eq!(meta.dynamic_conditions.len(), 1);
        let index = meta.view("index").unwrap();
        assert_eq!(index.dynamic_conditions().len(), 1);
        assert_eq!(
            index.scope(),
            Scope::View {
                id: "button".to_string(),
                version: "2.0".to_string(),
                view: "index".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_version() {
        let meta = ComponentMeta::new("button", "one");
        assert!(meta.parsed_version().is_err());
    }
}
