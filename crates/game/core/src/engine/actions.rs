//! Player-facing entry points.
//!
//! Each call validates against the current state before touching it, so an
//! `Err` always leaves the session exactly as it was. Calls that succeed
//! advance the world by one turn unless noted otherwise.

use tracing::debug;

use super::{
    AbilityError, AttackError, GameEngine, InventoryError, MoveError, MoveOutcome, TurnError,
};
use crate::combat::AttackResult;
use crate::state::{Direction, EntityId, EntityKind, ItemId, ItemSlot, Position};

impl GameEngine {
    /// Moves the player one cell, attacking, picking up or changing field
    /// depending on what is at the destination.
    pub fn move_player(&mut self, direction: Direction) -> Result<MoveOutcome, MoveError> {
        if self.state.game_over {
            return Err(MoveError::GameOver);
        }

        let destination = self.state.player_position().step(direction);
        let field = self.state.field();
        let Some(kind) = field.kind_at(destination) else {
            return Err(MoveError::OutOfBounds { destination });
        };

        if let Some(exit) = kind.exit_direction() {
            let (field, to) = self.enter_neighbor_field(exit);
            self.process_turn();
            return Ok(MoveOutcome::Transitioned { field, to });
        }
        if !kind.is_passable() {
            return Err(MoveError::Blocked { destination });
        }

        if let Some(enemy) = self.state.entities.enemy_at(destination) {
            let target = enemy.id;
            let result = self
                .combat(EntityId::PLAYER, target)
                .ok_or(MoveError::Blocked { destination })?;
            self.process_turn();
            return Ok(MoveOutcome::Attacked { target, result });
        }

        if let Some(entity) = self.state.entities.item_at(destination) {
            let entity_id = entity.id;
            let EntityKind::Item(item) = &entity.kind else {
                return Err(MoveError::Blocked { destination });
            };
            let item = item.clone();
            let item_id = item.id;

            if !self.env.items().add_item(&mut self.state.entities.player, item) {
                return Err(MoveError::InventoryFull { destination });
            }
            debug!(item = ?item_id, position = %destination, "item picked up");

            self.state.entities.remove_item(entity_id);
            self.relocate(EntityId::PLAYER, destination);
            self.process_turn();
            return Ok(MoveOutcome::PickedUp {
                item: item_id,
                to: destination,
            });
        }

        if self.state.field().occupant_at(destination).is_some() {
            return Err(MoveError::Blocked { destination });
        }

        self.relocate(EntityId::PLAYER, destination);
        self.process_turn();
        Ok(MoveOutcome::Moved { to: destination })
    }

    /// `attacker` strikes `defender` once. The world only advances when the
    /// player is the attacker.
    pub fn perform_attack(
        &mut self,
        attacker: EntityId,
        defender: EntityId,
    ) -> Result<AttackResult, AttackError> {
        if self.state.game_over {
            return Err(AttackError::GameOver);
        }
        if attacker == defender {
            return Err(AttackError::SelfTarget(attacker));
        }
        for id in [attacker, defender] {
            let entity = self
                .state
                .entities
                .get(id)
                .ok_or(AttackError::UnknownEntity(id))?;
            if matches!(entity.kind, EntityKind::Item(_)) {
                return Err(AttackError::NotCombatant(id));
            }
        }

        let result = self
            .combat(attacker, defender)
            .ok_or(AttackError::UnknownEntity(defender))?;
        if attacker.is_player() {
            self.process_turn();
        }
        Ok(result)
    }

    /// Confuses the enemy standing at `position` for `duration` turns.
    pub fn confuse_enemy_at(
        &mut self,
        position: Position,
        duration: u32,
    ) -> Result<EntityId, AbilityError> {
        if self.state.game_over {
            return Err(AbilityError::GameOver);
        }
        let id = self
            .state
            .entities
            .enemy_at(position)
            .map(|enemy| enemy.id)
            .ok_or(AbilityError::NoEnemyAt(position))?;

        self.confuse(id, duration);
        self.process_turn();
        Ok(id)
    }

    /// Confuses every enemy within the configured Chebyshev radius of the
    /// player and starts the shared cooldown.
    pub fn use_confusion_ability(&mut self) -> Result<Vec<EntityId>, AbilityError> {
        if self.state.game_over {
            return Err(AbilityError::GameOver);
        }
        if self.state.confusion_cooldown > 0 {
            return Err(AbilityError::OnCooldown {
                remaining: self.state.confusion_cooldown,
            });
        }

        let origin = self.state.player_position();
        let radius = self.config.confusion.radius;
        let targets: Vec<EntityId> = self
            .state
            .entities
            .enemies
            .iter()
            .filter(|enemy| enemy.position.chebyshev(origin) <= radius)
            .map(|enemy| enemy.id)
            .collect();
        if targets.is_empty() {
            return Err(AbilityError::NoTargetsInRange);
        }

        let duration = self.config.confusion.duration;
        for &id in &targets {
            self.confuse(id, duration);
        }
        self.state.confusion_cooldown = self.config.confusion.cooldown;
        debug!(count = targets.len(), duration, "confusion ability used");

        self.process_turn();
        Ok(targets)
    }

    /// Skips the player's move.
    pub fn wait(&mut self) -> Result<(), TurnError> {
        if self.state.game_over {
            return Err(TurnError::GameOver);
        }
        self.process_turn();
        Ok(())
    }

    /// Equips a carried item. Does not consume a turn.
    pub fn equip_item(&mut self, item: ItemId) -> Result<(), InventoryError> {
        if self.state.game_over {
            return Err(InventoryError::GameOver);
        }
        if !self.env.items().equip_item(&mut self.state.entities.player, item) {
            return Err(InventoryError::NotEquippable(item));
        }
        Ok(())
    }

    /// Returns the item in `slot` to the carried items. Does not consume a
    /// turn.
    pub fn unequip_item(&mut self, slot: ItemSlot) -> Result<(), InventoryError> {
        if self.state.game_over {
            return Err(InventoryError::GameOver);
        }
        if !self.env.items().unequip_item(&mut self.state.entities.player, slot) {
            return Err(InventoryError::EmptySlot(slot));
        }
        Ok(())
    }

    fn confuse(&mut self, id: EntityId, duration: u32) {
        if !self.behaviors.confuse(id, duration) {
            return;
        }
        if let Some(profile) = self
            .state
            .entities
            .enemy_mut(id)
            .and_then(|enemy| enemy.enemy_mut())
        {
            profile.confusion_turns = duration;
        }
        debug!(id = %id, duration, "enemy confused");
    }
}
