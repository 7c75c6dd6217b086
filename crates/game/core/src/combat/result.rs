//! Combat result types and attack resolution.

use super::damage::{apply_damage, calculate_damage};
use crate::stats::GameStats;

/// Result of one attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub damage: u32,
    /// Defender health after the hit.
    pub remaining_health: u32,
    pub killed: bool,
}

/// Resolves an attack and applies it to the defender's stats.
pub fn resolve_attack(attacker: &GameStats, defender: &mut GameStats) -> AttackResult {
    let damage = calculate_damage(attacker, defender);
    let remaining_health = apply_damage(defender, damage);
    AttackResult {
        damage,
        remaining_health,
        killed: remaining_health == 0,
    }
}
