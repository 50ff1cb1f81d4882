//! Catalog loading from a components directory.
//!
//! Two layouts are recognised:
//!
//! ```text
//! components/
//!   button/
//!     1.0/meta.json
//!     2.0/meta.json
//!     2.0/views/index.html
//!   example/
//!     meta.json
//! ```
//!
//! A view without an inline `template` takes its markup from
//! `views/<view>.html` next to the `meta.json`, when that file exists.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use tessera_core::error::{CatalogError, Result};

use super::{ComponentCatalog, ComponentMeta, InMemoryCatalog};

const META_FILE: &str = "meta.json";
const VIEWS_DIR: &str = "views";

/// Loads component metadata from disk.
pub struct CatalogLoader {
    root: PathBuf,
}

impl CatalogLoader {
    /// Create a loader for a components directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load every component under the root into a new catalog.
    pub async fn load(&self) -> Result<InMemoryCatalog> {
        let catalog = InMemoryCatalog::new();
        self.load_into(&catalog).await?;
        Ok(catalog)
    }

    /// Load every component under the root into an existing catalog.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - The number of component versions loaded.
    /// * `Err` - If the directory cannot be read or a `meta.json` is invalid.
    pub async fn load_into<C>(&self, catalog: &C) -> Result<usize>
    where
        C: ComponentCatalog + ?Sized,
    {
        info!("Scanning components in {}", self.root.display());

        if !fs::try_exists(&self.root).await? {
            warn!("Components directory not found: {}", self.root.display());
            return Ok(0);
        }

        let mut loaded = 0;
        for component_dir in Self::subdirectories(&self.root).await? {
            let meta_path = component_dir.join(META_FILE);
            if fs::try_exists(&meta_path).await? {
                catalog.insert(Self::read_meta(&component_dir).await?)?;
                loaded += 1;
            }

            for version_dir in Self::subdirectories(&component_dir).await? {
                if fs::try_exists(version_dir.join(META_FILE)).await? {
                    catalog.insert(Self::read_meta(&version_dir).await?)?;
                    loaded += 1;
                }
            }
        }

        info!("Loaded {} component versions", loaded);

        Ok(loaded)
    }

    async fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(dir).await?;
        let mut dirs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    async fn read_meta(dir: &Path) -> Result<ComponentMeta> {
        let meta_path = dir.join(META_FILE);
        let invalid = |reason: String| CatalogError::InvalidMetadata {
            path: meta_path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(&meta_path).await?;
        let mut meta: ComponentMeta =
            serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;
        meta.parsed_version()
            .map_err(|e| invalid(e.to_string()))?;

        for (name, view) in meta.views.iter_mut() {
            if view.template.is_some() {
                continue;
            }
            let template_path = dir.join(VIEWS_DIR).join(format!("{}.html", name));
            if fs::try_exists(&template_path).await? {
                view.template = Some(fs::read_to_string(&template_path).await?);
            }
        }

        Ok(meta)
    }
}
