//! Combat, deaths and rewards.

use tracing::{debug, info, warn};

use super::GameEngine;
use crate::combat::{AttackResult, resolve_attack};
use crate::state::{Entity, EntityId};

impl GameEngine {
    /// Resolves one attack and handles a resulting death.
    ///
    /// Returns `None` when either side is missing.
    pub(super) fn combat(&mut self, attacker: EntityId, defender: EntityId) -> Option<AttackResult> {
        let attacker_stats = self.state.entities.get(attacker)?.stats;
        let target = self.state.entities.get_mut(defender)?;
        let result = resolve_attack(&attacker_stats, &mut target.stats);

        debug!(
            attacker = %attacker,
            defender = %defender,
            damage = result.damage,
            remaining = result.remaining_health,
            "attack resolved"
        );

        if result.killed {
            self.handle_death(attacker, defender);
        }
        Some(result)
    }

    fn handle_death(&mut self, killer: EntityId, victim: EntityId) {
        if victim.is_player() {
            info!(killer = %killer, turn = self.state.turn, "player died");
            self.state.game_over = true;
            return;
        }

        let Some(enemy) = self.remove_enemy(victim) else {
            return;
        };
        debug!(id = %victim, name = %enemy.name, position = %enemy.position, "enemy died");

        if killer.is_player() {
            self.reward_player(&enemy);
        }
    }

    /// Experience, equipment wear and loot for killing `enemy`.
    fn reward_player(&mut self, enemy: &Entity) {
        let player = &mut self.state.entities.player;
        if let Some(level_up) = player.stats.gain_experience(enemy.experience_yield()) {
            info!(
                level = level_up.level,
                carried = level_up.carried_experience,
                next = level_up.next_threshold,
                "player leveled up"
            );

            if self
                .config
                .victory_level
                .is_some_and(|target| level_up.level >= target)
            {
                info!(level = level_up.level, "victory");
                self.state.victory = true;
                self.state.game_over = true;
            }
        }

        for broken in self.env.items().wear_equipment(player) {
            debug!(item = %broken.name, slot = %broken.slot, "equipment broke");
        }

        if let Some(item) = self.env.items().roll_loot(&mut self.rng) {
            let name = item.name.clone();
            match self.place_item(item, enemy.position) {
                Ok(id) => debug!(id = %id, item = %name, position = %enemy.position, "loot dropped"),
                Err(error) => warn!(%error, item = %name, "loot could not be placed"),
            }
        }
    }
}
