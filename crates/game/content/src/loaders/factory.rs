//! Content factory for building collaborators from a data directory.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, GameEnv, GameMap, Theme};
use tracing::debug;

use crate::items::{InventoryService, ItemCatalog};
use crate::loaders::{ConfigLoader, ItemLoader, LoadResult, MapLoader, ThemeLoader};
use crate::themes::{ThemeTable, ThemedFactory};

/// Content factory that loads game content from a data directory, falling
/// back to the built-in tables for anything the directory does not provide.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// ├── themes/
/// │   ├── fantasy.ron
/// │   └── forest.ron
/// └── maps/
///     └── arena.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the item catalog from `items.ron`, or the built-in catalog.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        let path = self.data_dir.join("items.ron");
        if !path.exists() {
            debug!(path = %path.display(), "using built-in item catalog");
            return Ok(ItemCatalog::builtin()?);
        }
        ItemLoader::load(&path)
    }

    /// Load the archetype table for `theme` from `themes/{theme}.ron`, or the
    /// built-in table.
    pub fn load_theme(&self, theme: Theme) -> LoadResult<ThemeTable> {
        let path = self.data_dir.join("themes").join(format!("{theme}.ron"));
        if !path.exists() {
            debug!(path = %path.display(), "using built-in theme table");
            return Ok(ThemeTable::builtin(theme)?);
        }
        ThemeLoader::load(&path)
    }

    /// Load a map from `maps/{map_name}.ron`.
    ///
    /// # Arguments
    ///
    /// * `map_name` - Name of the map file (without `.ron` extension)
    pub fn load_map(&self, map_name: &str) -> LoadResult<GameMap> {
        let path = self.data_dir.join("maps").join(format!("{map_name}.ron"));
        MapLoader::load(&path)
    }

    /// Builds the engine collaborators for `config`: a themed factory seeded
    /// from the session seed and an inventory service over the catalog.
    pub fn build_env(&self, config: &GameConfig) -> LoadResult<GameEnv> {
        let table = self.load_theme(config.theme)?;
        let factory = ThemedFactory::new(table, config.seed)?;
        let items = InventoryService::new(self.load_items()?);
        Ok(GameEnv::new(Box::new(factory), Box::new(items)))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Engine collaborators from the built-in tables only.
pub fn builtin_env(theme: Theme, seed: u64) -> LoadResult<GameEnv> {
    let factory = ThemedFactory::builtin(theme, seed)?;
    let items = InventoryService::new(ItemCatalog::builtin()?);
    Ok(GameEnv::new(Box::new(factory), Box::new(items)))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn empty_directory_falls_back_to_builtins() {
        let dir = tempfile::tempdir().expect("temp dir");
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().expect("defaults"), GameConfig::default());
        assert_eq!(factory.load_items().expect("builtin").items.len(), 7);
        let table = factory.load_theme(Theme::Forest).expect("builtin");
        assert_eq!(table.player.name, "Ranger");
        assert!(factory.load_map("missing").is_err());
    }

    #[test]
    fn directory_files_override_builtins() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("config.toml"), "seed = 11\ntheme = \"forest\"")
            .expect("write config");
        fs::write(
            dir.path().join("items.ron"),
            r#"(items: [(name: "Stick", slot: Sword, modifier: 1, drop_chance: 0.5, durability: 2)])"#,
        )
        .expect("write items");
        fs::create_dir(dir.path().join("maps")).expect("maps dir");
        fs::write(
            dir.path().join("maps").join("arena.ron"),
            r##"(width: 1, height: 1, fields: [["#+++#", "+...+", "+...+", "#+++#"]])"##,
        )
        .expect("write map");

        let factory = ContentFactory::new(dir.path());
        let config = factory.load_config().expect("config");
        assert_eq!(config.seed, 11);
        assert_eq!(config.theme, Theme::Forest);

        let items = factory.load_items().expect("items");
        assert_eq!(items.items.len(), 1);
        assert_eq!(items.items[0].name, "Stick");

        let map = factory.load_map("arena").expect("map");
        assert_eq!(map.field_width(), 5);

        assert!(factory.build_env(&config).is_ok());
    }
}
