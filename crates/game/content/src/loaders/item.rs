//! Item catalog loader.

use std::path::Path;

use anyhow::{Context, ensure};

use crate::items::ItemCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load an item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an ItemCatalog
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        let catalog = ItemCatalog::from_ron(&content)
            .with_context(|| format!("Failed to parse item catalog {}", path.display()))?;

        for item in &catalog.items {
            ensure!(
                (0.0..=1.0).contains(&item.drop_chance),
                "item {} has drop chance {} outside [0, 1]",
                item.name,
                item.drop_chance
            );
        }
        Ok(catalog)
    }
}
