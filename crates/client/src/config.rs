//! Client configuration and the layered merge into a [`GameConfig`].
//!
//! Precedence, lowest first: built-in defaults, the TOML file
//! (`--config` / `GAME_CONFIG`, or `config.toml` in the data directory),
//! environment variables, command-line flags.
use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use game_content::{ConfigLoader, ContentFactory};
use game_core::{GameConfig, Theme};
use tracing::debug;

/// Settings the binary reads before it builds a session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientConfig {
    pub seed: Option<u64>,
    pub theme: Option<Theme>,
    /// Explicit TOML game configuration.
    pub config_path: Option<PathBuf>,
    /// Directory with `config.toml`, `items.ron`, `themes/` and `maps/`.
    pub data_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    /// Also write logs to `<log_dir>/<session_id>/client.log`.
    pub log_to_file: bool,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GAME_SEED` - Session seed
    /// - `GAME_THEME` - `fantasy` or `forest`
    /// - `GAME_CONFIG` - Path to a TOML game configuration
    /// - `GAME_DATA_DIR` - Content directory
    /// - `GAME_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `GAME_SESSION_ID` - Session identifier for the log file
    /// - `GAME_LOG_FILE` - Enable file logging (default: false)
    pub fn from_env() -> Self {
        let mut config = Self {
            seed: read_env::<u64>("GAME_SEED"),
            theme: read_env::<Theme>("GAME_THEME"),
            config_path: env::var("GAME_CONFIG").ok().map(PathBuf::from),
            data_dir: env::var("GAME_DATA_DIR").ok().map(PathBuf::from),
            log_dir: env::var("GAME_LOG_DIR").ok().map(PathBuf::from),
            session_id: env::var("GAME_SESSION_ID").ok(),
            log_to_file: false,
        };

        if let Some(enable) = read_env::<bool>("GAME_LOG_FILE") {
            config.log_to_file = enable;
        } else if env::var("GAME_LOG_FILE").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.log_to_file = true;
        }

        config
    }

    /// Resolves the game configuration for this client.
    pub fn game_config(&self) -> Result<GameConfig> {
        let mut config = match (&self.config_path, &self.data_dir) {
            (Some(path), _) => ConfigLoader::load(path)?,
            (None, Some(dir)) => ContentFactory::new(dir).load_config()?,
            (None, None) => GameConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }

        debug!(seed = config.seed, theme = %config.theme, "game configuration resolved");
        Ok(config)
    }

    /// Directory for session log files.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(default_log_dir)
    }
}

/// Platform cache directory for logs, e.g. `~/.cache/dungeon/logs` on Linux.
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dungeon")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| Path::new("/tmp/dungeon").join("logs"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn defaults_without_sources() {
        let config = ClientConfig::default().game_config().unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn overrides_beat_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        fs::write(&path, "seed = 7\ntheme = \"forest\"\nregeneration_percent = 3\n").unwrap();

        let client = ClientConfig {
            config_path: Some(path.clone()),
            ..ClientConfig::default()
        };
        let config = client.game_config().unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.theme, Theme::Forest);
        assert_eq!(config.regeneration_percent, 3);

        let client = ClientConfig {
            seed: Some(99),
            theme: Some(Theme::Fantasy),
            config_path: Some(path),
            ..ClientConfig::default()
        };
        let config = client.game_config().unwrap();
        assert_eq!(config.seed, 99);
        assert_eq!(config.theme, Theme::Fantasy);
        assert_eq!(config.regeneration_percent, 3);
    }

    #[test]
    fn data_dir_config_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let client = ClientConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..ClientConfig::default()
        };
        assert_eq!(client.game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let client = ClientConfig {
            config_path: Some(PathBuf::from("/nonexistent/dungeon.toml")),
            ..ClientConfig::default()
        };
        assert!(client.game_config().is_err());
    }

    #[test]
    fn explicit_log_dir_wins() {
        let client = ClientConfig {
            log_dir: Some(PathBuf::from("/var/log/dungeon")),
            ..ClientConfig::default()
        };
        assert_eq!(client.log_dir(), PathBuf::from("/var/log/dungeon"));
        assert!(ClientConfig::default().log_dir().ends_with("logs"));
    }
}
