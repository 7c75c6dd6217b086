//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the map, the entities of
//! the current field and turn bookkeeping. Callers read this state through the
//! engine but mutate it exclusively through [`crate::engine::GameEngine`].
pub mod types;

use std::collections::BTreeSet;

pub use types::{
    Direction, EnemyCategory, EnemyProfile, EntitiesState, Entity, EntityId, EntityKind,
    FieldCoord, GameField, GameMap, InventoryItems, InventoryState, Item, ItemId, ItemSlot,
    Position, Replicator, Tile, TileKind,
};

use crate::config::Theme;
use crate::error::SetupError;

/// Canonical snapshot of the game state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub map: GameMap,
    /// Field the player is currently in.
    pub current_field: FieldCoord,
    pub entities: EntitiesState,
    /// Number of completed turns.
    pub turn: u64,
    pub game_over: bool,
    pub victory: bool,
    pub theme: Theme,
    /// Enemies that still have replication budget left.
    pub replicating: BTreeSet<EntityId>,
    /// Turns until the area confusion ability can be used again.
    pub confusion_cooldown: u32,

    /// Sequential entity ID allocator (monotonically increasing).
    ///
    /// Never reused. ID 0 is reserved for the player.
    next_entity_id: u32,
}

impl GameState {
    /// Creates a fresh state with the player standing in `current_field`.
    ///
    /// The player's tile occupancy is set here; the player must stand on a
    /// walkable cell.
    pub fn new(
        mut map: GameMap,
        current_field: FieldCoord,
        mut player: types::Entity,
        theme: Theme,
    ) -> Result<Self, SetupError> {
        let field = map
            .field_mut(current_field)
            .ok_or(SetupError::StartFieldOutOfMap(current_field))?;
        if !field.is_walkable(player.position) {
            return Err(SetupError::NotWalkable(player.position));
        }
        field.set_occupant(player.position, Some(EntityId::PLAYER));
        player.id = EntityId::PLAYER;

        Ok(Self {
            map,
            current_field,
            entities: EntitiesState::new(player),
            turn: 0,
            game_over: false,
            victory: false,
            theme,
            replicating: BTreeSet::new(),
            confusion_cooldown: 0,
            next_entity_id: 1,
        })
    }

    /// Allocates the next unused entity id.
    pub fn allocate_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self.next_entity_id.saturating_add(1);
        id
    }

    pub fn field(&self) -> &GameField {
        self.map.field_clamped(self.current_field)
    }

    pub fn field_mut(&mut self) -> &mut GameField {
        self.map.field_clamped_mut(self.current_field)
    }

    pub fn player(&self) -> &Entity {
        &self.entities.player
    }

    pub fn player_position(&self) -> Position {
        self.entities.player.position
    }
}
