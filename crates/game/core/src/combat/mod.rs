//! Combat resolution.
//!
//! Pure functions over [`GameStats`](crate::stats::GameStats): attacks always
//! hit and deal `max(0, attack - defense)`. Death handling, experience and
//! loot are applied by the engine.

pub mod damage;
pub mod result;

pub use damage::{apply_damage, calculate_damage};
pub use result::{AttackResult, resolve_attack};
