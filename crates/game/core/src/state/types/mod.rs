pub mod common;
pub mod entities;
pub mod item;
pub mod tile;
pub mod world;

// Re-export common types
pub use common::{Direction, EntityId, FieldCoord, Position};

// Re-export entity types
pub use entities::{EnemyCategory, EnemyProfile, EntitiesState, Entity, EntityKind, Replicator};

// Re-export item types
pub use item::{InventoryItems, InventoryState, Item, ItemId, ItemSlot};

// Re-export world types
pub use tile::{Tile, TileKind};
pub use world::{GameField, GameMap};
