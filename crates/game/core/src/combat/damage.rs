//! Damage calculation and application.

use crate::stats::GameStats;

/// Damage an attacker deals to a defender.
///
/// # Formula
///
/// ```text
/// damage = max(0, attacker.attack - defender.defense)
/// ```
pub fn calculate_damage(attacker: &GameStats, defender: &GameStats) -> u32 {
    attacker.attack.saturating_sub(defender.defense)
}

/// Applies damage to a stat block, saturating health at zero.
///
/// # Returns
///
/// Remaining health.
pub fn apply_damage(defender: &mut GameStats, damage: u32) -> u32 {
    defender.take_damage(damage)
}
