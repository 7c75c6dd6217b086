//! Deterministic rules and data types of the dungeon simulator.
//!
//! `game-core` generates the overworld ([`worldgen`]), decides how enemies
//! move ([`ai`]) and runs turns ([`engine::GameEngine`]). It performs no I/O;
//! content loading and presentation live in the crates built on top of it.
//! All state mutation flows through [`engine::GameEngine`].
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod replication;
pub mod state;
pub mod stats;
pub mod worldgen;

pub use ai::{BehaviorTable, BehaviorView, EnemyState, MovementStrategy, PatrolRoute};
pub use combat::AttackResult;
pub use config::{
    AiConfig, ConfusionConfig, GameConfig, ReplicationConfig, SpawnTable, TerrainConfig, Theme,
};
pub use engine::{
    AbilityError, AttackError, GameEngine, InventoryError, MoveError, MoveOutcome, TurnError,
};
pub use env::{EntityFactory, EntityTemplate, FixedFactory, GameEnv, GameRng, ItemOracle, NoLoot};
pub use error::{ErrorSeverity, GameError, MapError, SetupError};
pub use state::{
    Direction, EnemyCategory, EnemyProfile, EntitiesState, Entity, EntityId, EntityKind,
    FieldCoord, GameField, GameMap, GameState, InventoryState, Item, ItemId, ItemSlot, Position,
    Replicator, Tile, TileKind,
};
pub use stats::{GameStats, LevelUp};
pub use worldgen::{MapBuilder, PerlinNoise};
