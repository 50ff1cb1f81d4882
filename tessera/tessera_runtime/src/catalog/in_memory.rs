//! In-memory component catalog.

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use tessera_core::error::{CatalogError, Result};
use tessera_core::Version;

use super::{ComponentCatalog, ComponentMeta};

/// An in-memory component catalog.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    /// Component versions, indexed by component id.
    components: Arc<DashMap<String, BTreeMap<Version, Arc<ComponentMeta>>>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of catalogued component versions.
    pub fn len(&self) -> usize {
        self.components.iter().map(|entry| entry.value().len()).sum()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ComponentCatalog for InMemoryCatalog {
    fn insert(&self, meta: ComponentMeta) -> Result<()> {
        let version = meta.parsed_version()?;
        let mut versions = self.components.entry(meta.id.clone()).or_default();

        if versions.contains_key(&version) {
            return Err(CatalogError::Conflict {
                id: meta.id,
                version: meta.version,
            }
            .into());
        }

        debug!(component = %meta.identity(), views = meta.views.len(), "Catalogued component");
        versions.insert(version, Arc::new(meta));

        Ok(())
    }

    fn get(&self, id: &str, version: &str) -> Option<Arc<ComponentMeta>> {
        let version = Version::from_str(version).ok()?;
        self.components
            .get(id)
            .and_then(|versions| versions.get(&version).cloned())
    }

    fn latest(&self, id: &str) -> Option<Arc<ComponentMeta>> {
        self.components
            .get(id)
            .and_then(|versions| versions.values().next_back().cloned())
    }

    fn versions(&self, id: &str) -> Vec<String> {
        self.components
            .get(id)
            .map(|versions| versions.values().map(|m| m.version.clone()).collect())
            .unwrap_or_default()
    }

    fn list(&self) -> Vec<Arc<ComponentMeta>> {
        let mut all: Vec<Arc<ComponentMeta>> = self
            .components
            .iter()
            .flat_map(|entry| entry.value().values().cloned().collect::<Vec<_>>())
            .collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}
