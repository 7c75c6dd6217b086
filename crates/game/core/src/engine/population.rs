//! Spawning a fresh roster into the current field.

use rand::seq::SliceRandom;
use tracing::{debug, warn};

use super::GameEngine;
use crate::ai::MovementStrategy;
use crate::env::rng::stream;
use crate::env::stream_rng;
use crate::state::EnemyCategory;

impl GameEngine {
    /// Spawns the configured number of enemies per category on uniformly
    /// chosen walkable cells.
    ///
    /// Each call draws from its own stream, so a field's roster depends only
    /// on the seed and how many fields were populated before it.
    pub(super) fn populate_current_field(&mut self) {
        let mut rng = stream_rng(self.config.seed, self.field_visits, 0, stream::POPULATION);
        self.field_visits += 1;

        let spawns = self.config.spawns.clone();
        let plan = [
            (EnemyCategory::Melee, spawns.melee),
            (EnemyCategory::Ranged, spawns.ranged),
            (EnemyCategory::Elite, spawns.elite),
            (EnemyCategory::Replicating, spawns.replicating),
        ];

        for (category, count) in plan {
            for _ in 0..count {
                let cells = self.state.field().walkable_cells();
                let Some(&position) = cells.choose(&mut rng) else {
                    warn!(
                        field = %self.state.current_field,
                        spawned = self.state.entities.enemies.len(),
                        wanted = spawns.total(),
                        "field is full, spawning stopped"
                    );
                    return;
                };

                let template = self.env.factory().create_enemy(category, spawns.level);
                let strategy = MovementStrategy::random(&mut rng);
                if let Err(error) = self.spawn_enemy(template, Some(category), position, strategy) {
                    warn!(%error, "spawn failed");
                }
            }
        }

        debug!(
            field = %self.state.current_field,
            enemies = self.state.entities.enemies.len(),
            "field populated"
        );
    }
}
