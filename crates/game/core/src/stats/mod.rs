//! Combat statistics and progression.
//!
//! [`GameStats`] is the single stat block shared by the player, enemies and
//! replicas. Leveling, damage and regeneration are expressed as methods so the
//! engine never touches the raw counters directly.

use crate::state::ItemSlot;

/// Maximum-health bonus granted per level-up.
pub const LEVEL_HEALTH_BONUS: u32 = 10;
/// Attack bonus granted per level-up.
pub const LEVEL_ATTACK_BONUS: u32 = 2;
/// Defense bonus granted per level-up.
pub const LEVEL_DEFENSE_BONUS: u32 = 1;

/// Stat block for any living entity.
///
/// `health` is kept within `[0, max_health]` by every mutating method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStats {
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub experience: u32,
    pub level: u32,
    pub experience_to_next_level: u32,
}

/// Summary of a level-up triggered by an experience grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub carried_experience: u32,
    pub next_threshold: u32,
}

impl GameStats {
    /// Creates a level-1 stat block at full health with no progression track.
    pub const fn new(max_health: u32, attack: u32, defense: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            attack,
            defense,
            experience: 0,
            level: 1,
            experience_to_next_level: 0,
        }
    }

    pub const fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub const fn with_threshold(mut self, experience_to_next_level: u32) -> Self {
        self.experience_to_next_level = experience_to_next_level;
        self
    }

    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Current health as a fraction of maximum health (0.0 for an empty pool).
    pub fn health_ratio(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        f64::from(self.health) / f64::from(self.max_health)
    }

    /// Subtracts `damage`, saturating at zero. Returns the remaining health.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.health = self.health.saturating_sub(damage);
        self.health
    }

    /// Adds `amount` health, capped at maximum. Returns the health actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    /// Per-turn regeneration: `percent` of maximum health, floored, at least 1.
    pub fn regeneration_amount(&self, percent: u32) -> u32 {
        (self.max_health.saturating_mul(percent) / 100).max(1)
    }

    /// Credits experience and resolves at most one level-up.
    ///
    /// The remainder above the threshold is carried over and the next
    /// threshold grows by half (floored). Entities without a progression
    /// track (`experience_to_next_level == 0`) accumulate experience only.
    pub fn gain_experience(&mut self, amount: u32) -> Option<LevelUp> {
        self.experience = self.experience.saturating_add(amount);

        let threshold = self.experience_to_next_level;
        if threshold == 0 || self.experience < threshold {
            return None;
        }

        self.level += 1;
        self.experience -= threshold;
        self.experience_to_next_level = threshold.saturating_mul(3) / 2;

        self.max_health += LEVEL_HEALTH_BONUS;
        self.health = self.max_health;
        self.attack += LEVEL_ATTACK_BONUS;
        self.defense += LEVEL_DEFENSE_BONUS;

        Some(LevelUp {
            level: self.level,
            carried_experience: self.experience,
            next_threshold: self.experience_to_next_level,
        })
    }

    /// Returns a copy with health pools and combat stats scaled by integer
    /// percentages (each floored).
    pub fn decayed(&self, health_percent: u32, combat_percent: u32) -> Self {
        let scale = |value: u32, percent: u32| {
            (u64::from(value) * u64::from(percent) / 100) as u32
        };

        Self {
            health: scale(self.health, health_percent),
            max_health: scale(self.max_health, health_percent),
            attack: scale(self.attack, combat_percent),
            defense: scale(self.defense, combat_percent),
            ..*self
        }
    }

    /// Applies an equipped item's modifier: swords raise attack, armor
    /// raises defense, rings raise both maximum and current health.
    pub fn apply_modifier(&mut self, slot: ItemSlot, modifier: i32) {
        match slot {
            ItemSlot::Sword => self.attack = adjust(self.attack, modifier),
            ItemSlot::Armor => self.defense = adjust(self.defense, modifier),
            ItemSlot::Ring => {
                self.max_health = adjust(self.max_health, modifier);
                self.health = adjust(self.health, modifier).min(self.max_health);
            }
        }
    }

    /// Reverts [`apply_modifier`](Self::apply_modifier). A ring only lowers
    /// current health as far as the reduced maximum requires.
    pub fn revert_modifier(&mut self, slot: ItemSlot, modifier: i32) {
        match slot {
            ItemSlot::Sword => self.attack = adjust(self.attack, -modifier),
            ItemSlot::Armor => self.defense = adjust(self.defense, -modifier),
            ItemSlot::Ring => {
                self.max_health = adjust(self.max_health, -modifier);
                self.health = self.health.min(self.max_health);
            }
        }
    }
}

/// Adds a signed delta, saturating at both ends.
fn adjust(value: u32, delta: i32) -> u32 {
    if delta >= 0 {
        value.saturating_add(delta.unsigned_abs())
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}
