//! World advancement after a player action.
//!
//! Order of one turn: enemies act, the dead are purged, replicators roll,
//! confusion counts down, enemies regenerate and behaviour states are
//! re-evaluated. A turn that ends the game stops after the step that ended
//! it.

use tracing::{debug, trace};

use super::GameEngine;
use crate::ai::MovementStrategy;
use crate::env::rng::stream;
use crate::env::stream_rng;
use crate::replication::try_replicate;
use crate::state::EntityId;

impl GameEngine {
    pub(super) fn process_turn(&mut self) {
        if self.state.game_over {
            return;
        }
        trace!(turn = self.state.turn, "turn started");

        self.enemy_phase();
        if self.state.game_over {
            return;
        }

        self.purge_dead();
        self.replication_phase();
        self.confusion_phase();
        self.regeneration_phase();
        self.transition_phase();

        self.state.turn += 1;
        self.state.confusion_cooldown = self.state.confusion_cooldown.saturating_sub(1);
        trace!(turn = self.state.turn, "turn finished");
    }

    fn enemy_phase(&mut self) {
        for id in self.state.entities.enemy_ids() {
            if self.state.game_over {
                break;
            }
            self.enemy_act(id);
        }
    }

    /// One enemy either strikes an adjacent player or moves.
    fn enemy_act(&mut self, id: EntityId) {
        let Some(enemy) = self.state.entities.enemy(id) else {
            return;
        };
        if !enemy.is_alive() {
            return;
        }

        let player = self.state.player_position();
        if let Some(state) = self.behaviors.state_mut(id) {
            state.observe(player);
        }
        if enemy.position.is_orthogonally_adjacent(player) {
            self.combat(id, EntityId::PLAYER);
            return;
        }

        let field = self.state.field();
        let destination = if enemy.is_confused() {
            let Some(strategy) = self.behaviors.strategy_mut(id) else {
                return;
            };
            strategy.next_position(enemy.position, player, field, &mut self.rng)
        } else {
            let Some((state, strategy)) = self.behaviors.state_and_strategy_mut(id) else {
                return;
            };
            state.next_position(enemy, player, field, strategy, &mut self.rng)
        };
        let origin = enemy.position;

        if destination == player {
            self.combat(id, EntityId::PLAYER);
        } else if destination != origin {
            trace!(id = %id, from = %origin, to = %destination, "enemy moved");
            self.relocate(id, destination);
        }
    }

    fn purge_dead(&mut self) {
        let dead: Vec<EntityId> = self
            .state
            .entities
            .enemies
            .iter()
            .filter(|enemy| !enemy.is_alive())
            .map(|enemy| enemy.id)
            .collect();
        for id in dead {
            self.remove_enemy(id);
        }
    }

    fn replication_phase(&mut self) {
        let parents: Vec<EntityId> = self.state.replicating.iter().copied().collect();
        for parent_id in parents {
            let Some(parent) = self.state.entities.enemy(parent_id) else {
                self.state.replicating.remove(&parent_id);
                continue;
            };
            let active = parent
                .enemy()
                .and_then(|profile| profile.replicator)
                .is_some_and(|replicator| !replicator.is_exhausted());
            if !active {
                self.state.replicating.remove(&parent_id);
                continue;
            }

            let mut rng = stream_rng(
                self.config.seed,
                self.state.turn,
                parent_id.0,
                stream::REPLICATION,
            );
            let Some(replica) = try_replicate(
                parent,
                self.state.field(),
                &self.config.replication,
                &mut rng,
            ) else {
                continue;
            };
            if replica.stats.health == 0 {
                continue;
            }

            let remaining = self
                .state
                .entities
                .enemy_mut(parent_id)
                .and_then(|parent| parent.enemy_mut())
                .and_then(|profile| profile.replicator.as_mut())
                .map(|replicator| {
                    replicator.budget = replicator.budget.saturating_sub(1);
                    replicator.budget
                })
                .unwrap_or(0);
            if remaining == 0 {
                self.state.replicating.remove(&parent_id);
            }

            let child_budget = replica
                .profile
                .replicator
                .map_or(0, |replicator| replicator.budget);
            let id = self.state.allocate_entity_id();
            let position = replica.position;
            let child = replica.into_entity(id);

            debug!(
                parent = %parent_id,
                child = %id,
                position = %position,
                budget = child_budget,
                "enemy replicated"
            );

            self.state.field_mut().set_occupant(position, Some(id));
            self.state.entities.enemies.push(child);
            let strategy = MovementStrategy::random(&mut self.rng);
            self.behaviors.insert(id, strategy);
            if child_budget > 0 {
                self.state.replicating.insert(id);
            }
        }
    }

    fn confusion_phase(&mut self) {
        for enemy in &mut self.state.entities.enemies {
            let id = enemy.id;
            let Some(profile) = enemy.enemy_mut() else {
                continue;
            };
            if profile.confusion_turns == 0 {
                continue;
            }
            profile.confusion_turns -= 1;
            if profile.confusion_turns == 0 {
                self.behaviors.restore(id);
                debug!(id = %id, "confusion wore off");
            }
        }
    }

    /// Living enemies recover a share of their max health. The player does
    /// not regenerate.
    fn regeneration_phase(&mut self) {
        let percent = self.config.regeneration_percent;
        for enemy in &mut self.state.entities.enemies {
            if enemy.is_alive() {
                let amount = enemy.stats.regeneration_amount(percent);
                enemy.stats.heal(amount);
            }
        }
    }

    fn transition_phase(&mut self) {
        for enemy in &self.state.entities.enemies {
            let Some(state) = self.behaviors.state_mut(enemy.id) else {
                continue;
            };
            if let Some(next) = state.should_transition(enemy, &self.config.ai) {
                debug!(id = %enemy.id, from = state.name(), to = next.name(), "behaviour changed");
                *state = next;
            }
        }
    }
}
