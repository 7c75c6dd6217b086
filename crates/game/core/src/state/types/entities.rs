use super::{EntityId, InventoryState, Item, Position};
use crate::stats::GameStats;

/// Archetype an enemy was spawned from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum EnemyCategory {
    Melee,
    Ranged,
    Elite,
    Replicating,
}

/// Self-replication capability carried by an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Replicator {
    /// Probability of spawning a clone on a given turn.
    pub chance: f64,
    /// Remaining clones this entity may still produce.
    pub budget: u32,
}

impl Replicator {
    pub const fn new(chance: f64, budget: u32) -> Self {
        Self { chance, budget }
    }

    pub const fn is_exhausted(&self) -> bool {
        self.budget == 0
    }
}

/// Enemy-only attributes.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyProfile {
    /// Experience granted to whoever kills this enemy.
    pub experience_yield: u32,
    pub category: Option<EnemyCategory>,
    /// Remaining confused turns; zero means not confused.
    pub confusion_turns: u32,
    pub replicator: Option<Replicator>,
}

impl EnemyProfile {
    pub fn new(experience_yield: u32, category: Option<EnemyCategory>) -> Self {
        Self {
            experience_yield,
            category,
            confusion_turns: 0,
            replicator: None,
        }
    }

    pub fn with_replicator(mut self, replicator: Replicator) -> Self {
        self.replicator = Some(replicator);
        self
    }

    pub fn is_confused(&self) -> bool {
        self.confusion_turns > 0
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Player { inventory: InventoryState },
    Enemy(EnemyProfile),
    Item(Item),
}

/// Anything that occupies a tile: the player, an enemy or a ground item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
    pub stats: GameStats,
    pub name: String,
    pub symbol: char,
}

impl Entity {
    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player { .. })
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn enemy(&self) -> Option<&EnemyProfile> {
        match &self.kind {
            EntityKind::Enemy(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn enemy_mut(&mut self) -> Option<&mut EnemyProfile> {
        match &mut self.kind {
            EntityKind::Enemy(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn inventory(&self) -> Option<&InventoryState> {
        match &self.kind {
            EntityKind::Player { inventory } => Some(inventory),
            _ => None,
        }
    }

    /// Splits a player into its stat block and inventory so both can be
    /// mutated together.
    pub fn player_parts_mut(&mut self) -> Option<(&mut GameStats, &mut InventoryState)> {
        match &mut self.kind {
            EntityKind::Player { inventory } => Some((&mut self.stats, inventory)),
            _ => None,
        }
    }

    /// Experience granted on death (zero for non-enemies).
    pub fn experience_yield(&self) -> u32 {
        self.enemy().map_or(0, |profile| profile.experience_yield)
    }

    pub fn is_confused(&self) -> bool {
        self.enemy().is_some_and(EnemyProfile::is_confused)
    }
}

/// Aggregate state for every entity in the current field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    pub player: Entity,
    /// Enemies in turn order.
    pub enemies: Vec<Entity>,
    /// Items lying on the ground.
    pub items: Vec<Entity>,
}

impl EntitiesState {
    pub fn new(player: Entity) -> Self {
        Self {
            player,
            enemies: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Returns a reference to an entity by ID (player, enemy or item).
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        if self.player.id == id {
            return Some(&self.player);
        }
        self.enemies
            .iter()
            .chain(self.items.iter())
            .find(|entity| entity.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if self.player.id == id {
            return Some(&mut self.player);
        }
        self.enemies
            .iter_mut()
            .chain(self.items.iter_mut())
            .find(|entity| entity.id == id)
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Entity> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    pub fn enemy_at(&self, position: Position) -> Option<&Entity> {
        self.enemies.iter().find(|enemy| enemy.position == position)
    }

    pub fn item_at(&self, position: Position) -> Option<&Entity> {
        self.items.iter().find(|item| item.position == position)
    }

    /// Removes an enemy from the roster, preserving the order of the rest.
    pub fn remove_enemy(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.enemies.iter().position(|enemy| enemy.id == id)?;
        Some(self.enemies.remove(index))
    }

    pub fn remove_item(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Drops every enemy and ground item; the player stays.
    pub fn clear_field(&mut self) {
        self.enemies.clear();
        self.items.clear();
    }

    pub fn enemy_ids(&self) -> Vec<EntityId> {
        self.enemies.iter().map(|enemy| enemy.id).collect()
    }
}
