//! Theme table loader.

use std::path::Path;

use anyhow::Context;

use crate::loaders::{LoadResult, read_file};
use crate::themes::ThemeTable;

/// Loader for archetype tables from RON files.
pub struct ThemeLoader;

impl ThemeLoader {
    pub fn load(path: &Path) -> LoadResult<ThemeTable> {
        let content = read_file(path)?;
        ThemeTable::from_ron(&content)
            .with_context(|| format!("Failed to parse theme table {}", path.display()))
    }
}
