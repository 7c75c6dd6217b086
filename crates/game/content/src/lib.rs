//! Data-driven content for the dungeon simulator.
//!
//! This crate supplies the collaborators `game-core` only describes as
//! traits:
//! - Themed entity archetypes ([`ThemedFactory`], an `EntityFactory`)
//! - The item catalog and inventory rules ([`InventoryService`], an `ItemOracle`)
//! - Loaders for static maps (RON) and game configuration (TOML)
//!
//! Built-in tables are compiled in; a data directory can override them.

pub mod items;
pub mod themes;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use items::{InventoryService, ItemCatalog, ItemDefinition};
pub use themes::{Archetype, CategoryTable, Growth, Ratio, ThemeError, ThemeTable, ThemedFactory};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, ItemLoader, LoadResult, MapLoader, ThemeLoader,
    factory::builtin_env,
};
