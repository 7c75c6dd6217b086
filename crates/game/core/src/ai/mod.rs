//! Enemy decision making: movement strategies wrapped by a per-enemy state
//! machine, plus the tables that associate both with enemy ids.
mod fsm;
mod strategy;

use std::collections::BTreeMap;

pub use fsm::{EnemyState, PatrolRoute};
pub use strategy::{MovementStrategy, RETREAT_RADIUS, greedy_step};

use crate::state::EntityId;

/// Read-only view of one enemy's behaviour entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BehaviorView<'a> {
    pub strategy: &'a MovementStrategy,
    pub state: &'a EnemyState,
    pub original: &'a MovementStrategy,
}

/// Behaviour bookkeeping for every live enemy of the current field.
///
/// Invariant: an id is present in all three maps or in none.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BehaviorTable {
    strategies: BTreeMap<EntityId, MovementStrategy>,
    states: BTreeMap<EntityId, EnemyState>,
    originals: BTreeMap<EntityId, MovementStrategy>,
}

impl BehaviorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an enemy in the Normal state with `strategy` as both current
    /// and original strategy.
    pub fn insert(&mut self, id: EntityId, strategy: MovementStrategy) {
        self.strategies.insert(id, strategy.clone());
        self.originals.insert(id, strategy);
        self.states.insert(id, EnemyState::Normal);
    }

    pub fn remove(&mut self, id: EntityId) {
        self.strategies.remove(&id);
        self.states.remove(&id);
        self.originals.remove(&id);
    }

    pub fn clear(&mut self) {
        self.strategies.clear();
        self.states.clear();
        self.originals.clear();
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.states.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.states.keys().copied()
    }

    pub fn view(&self, id: EntityId) -> Option<BehaviorView<'_>> {
        Some(BehaviorView {
            strategy: self.strategies.get(&id)?,
            state: self.states.get(&id)?,
            original: self.originals.get(&id)?,
        })
    }

    pub fn strategy_mut(&mut self, id: EntityId) -> Option<&mut MovementStrategy> {
        self.strategies.get_mut(&id)
    }

    /// Current state and current strategy, borrowed together.
    pub fn state_and_strategy_mut(
        &mut self,
        id: EntityId,
    ) -> Option<(&mut EnemyState, &mut MovementStrategy)> {
        Some((self.states.get_mut(&id)?, self.strategies.get_mut(&id)?))
    }

    pub fn state_mut(&mut self, id: EntityId) -> Option<&mut EnemyState> {
        self.states.get_mut(&id)
    }

    pub fn set_state(&mut self, id: EntityId, state: EnemyState) {
        if let Some(slot) = self.states.get_mut(&id) {
            *slot = state;
        }
    }

    /// Replaces the current strategy with a randomized wrapper around the
    /// original. Returns false for unknown ids.
    pub fn confuse(&mut self, id: EntityId, duration: u32) -> bool {
        let Some(original) = self.originals.get(&id) else {
            return false;
        };
        self.strategies
            .insert(id, MovementStrategy::randomized(original.clone(), duration));
        true
    }

    /// Puts the original strategy back in place.
    pub fn restore(&mut self, id: EntityId) {
        if let Some(original) = self.originals.get(&id) {
            self.strategies.insert(id, original.clone());
        }
    }
}
