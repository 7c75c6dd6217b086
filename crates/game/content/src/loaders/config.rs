//! Game configuration loader.

use std::path::Path;

use anyhow::{Context, ensure};
use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Missing keys fall back to [`GameConfig::default`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing GameConfig
    ///
    /// # Returns
    ///
    /// Returns a validated GameConfig.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parses and validates TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig =
            toml::from_str(content).context("Failed to parse config TOML")?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &GameConfig) -> LoadResult<()> {
        ensure!(
            config.map_width > 0 && config.map_height > 0,
            "map must be at least 1x1 fields (got {}x{})",
            config.map_width,
            config.map_height
        );
        ensure!(
            config.field_width >= 3 && config.field_height >= 3,
            "fields must be at least 3x3 (got {}x{})",
            config.field_width,
            config.field_height
        );
        ensure!(
            (0.0..=1.0).contains(&config.replication.chance),
            "replication chance {} is outside [0, 1]",
            config.replication.chance
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use game_core::Theme;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "seed = 7\ntheme = \"forest\"\n\n[confusion]\nradius = 4\n\n[spawns]\nelite = 3"
        )
        .expect("write config");

        let config = ConfigLoader::load(file.path()).expect("valid config");
        assert_eq!(config.seed, 7);
        assert_eq!(config.theme, Theme::Forest);
        assert_eq!(config.confusion.radius, 4);
        assert_eq!(config.confusion.cooldown, 10);
        assert_eq!(config.spawns.elite, 3);
        assert_eq!(config.spawns.melee, 3);
        assert_eq!(config.map_width, GameConfig::DEFAULT_MAP_SIZE);
    }

    #[test]
    fn tiny_fields_are_rejected() {
        let error = ConfigLoader::parse("field_width = 2").expect_err("too small");
        assert!(error.to_string().contains("3x3"));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.toml");
        let error = ConfigLoader::load(&path).expect_err("missing file");
        assert!(format!("{error:#}").contains("absent.toml"));
    }
}
