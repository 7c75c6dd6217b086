//! Headless dungeon client.
//!
//! Builds a session from configuration and content, drives it with scripted
//! or random commands and reports the outcome.

pub mod config;
pub mod driver;
pub mod logging;

use anyhow::{Context, Result};
use game_content::{ContentFactory, builtin_env};
use game_core::{GameConfig, GameEngine};
use tracing::info;

pub use config::ClientConfig;
pub use driver::{ActionCounts, Command, Driver, ScriptError, SessionReport};

/// Assembles an engine for `config`.
///
/// With a data directory, content and optionally a static map (`map_name`)
/// come from it; otherwise the built-in tables and a generated map are used.
pub fn build_engine(
    client: &ClientConfig,
    config: GameConfig,
    map_name: Option<&str>,
) -> Result<GameEngine> {
    let engine = match (&client.data_dir, map_name) {
        (Some(dir), map_name) => {
            let content = ContentFactory::new(dir);
            let env = content.build_env(&config)?;
            match map_name {
                Some(name) => {
                    let map = content.load_map(name)?;
                    info!(map = name, "using static map");
                    GameEngine::new(config, map, env)?
                }
                None => GameEngine::generate(config, env)?,
            }
        }
        (None, Some(name)) => {
            anyhow::bail!("map '{name}' requested without a data directory")
        }
        (None, None) => {
            let env = builtin_env(config.theme, config.seed)?;
            GameEngine::generate(config, env).context("failed to generate the map")?
        }
    };
    Ok(engine)
}
