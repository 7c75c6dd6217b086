//! Self-replication: an enemy with a [`Replicator`] may spawn a weakened
//! copy of itself into a free orthogonal neighbour.
//!
//! This module only decides whether and where a clone appears and what it
//! looks like. Registering the clone (id, roster, behaviour tables, parent
//! budget) is the engine's job.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::ReplicationConfig;
use crate::state::{EnemyProfile, Entity, EntityId, EntityKind, GameField, Position, Replicator};
use crate::stats::GameStats;

/// A clone that has not been given an id yet.
#[derive(Clone, Debug, PartialEq)]
pub struct Replica {
    pub parent: EntityId,
    pub position: Position,
    pub stats: GameStats,
    pub profile: EnemyProfile,
    pub name: String,
    pub symbol: char,
}

impl Replica {
    pub fn into_entity(self, id: EntityId) -> Entity {
        Entity {
            id,
            kind: EntityKind::Enemy(self.profile),
            position: self.position,
            stats: self.stats,
            name: self.name,
            symbol: self.symbol,
        }
    }
}

/// Rolls replication for `parent`.
///
/// Returns `None` when the parent cannot replicate (no replicator, budget
/// spent), the roll exceeds the chance, or every orthogonal neighbour is
/// blocked.
pub fn try_replicate<R: Rng + ?Sized>(
    parent: &Entity,
    field: &GameField,
    config: &ReplicationConfig,
    rng: &mut R,
) -> Option<Replica> {
    let profile = parent.enemy()?;
    let replicator = profile.replicator?;

    let roll: f64 = rng.r#gen();
    if roll > replicator.chance || replicator.is_exhausted() {
        return None;
    }

    let free: Vec<Position> = parent
        .position
        .orthogonal_neighbors()
        .into_iter()
        .filter(|candidate| field.is_walkable(*candidate))
        .collect();
    let position = *free.choose(rng)?;

    let child_profile = EnemyProfile {
        experience_yield: profile.experience_yield,
        category: profile.category,
        confusion_turns: 0,
        replicator: Some(Replicator::new(
            replicator.chance * config.chance_decay,
            replicator.budget - 1,
        )),
    };

    Some(Replica {
        parent: parent.id,
        position,
        stats: parent
            .stats
            .decayed(config.health_percent, config.combat_percent),
        profile: child_profile,
        name: parent.name.clone(),
        symbol: parent.symbol,
    })
}
