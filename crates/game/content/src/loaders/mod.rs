//! Content loaders for reading game data from files.
//!
//! Configuration is TOML; maps, item catalogs and theme tables are RON. Every
//! loader returns [`LoadResult`] so callers can attach their own context.

pub mod config;
pub mod factory;
pub mod item;
pub mod map;
pub mod theme;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use map::MapLoader;
pub use theme::ThemeLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
