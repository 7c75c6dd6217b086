//! Deterministic random number generation.
//!
//! The engine drives every random decision (population, strategy choice,
//! randomized movement, replication rolls) from a [`GameRng`] seeded by the
//! session seed. Independent sub-streams are derived with [`compute_seed`] so
//! that, for example, the population of a field does not depend on how many
//! random moves happened before the player entered it.
//!
//! # Determinism
//!
//! Given the same session seed and the same sequence of player commands, a
//! session replays identically.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random generator used throughout the engine.
pub type GameRng = ChaCha8Rng;

/// Sub-stream identifiers passed as `context` to [`compute_seed`].
pub mod stream {
    /// Main engine stream (strategy rolls, randomized movement).
    pub const ENGINE: u32 = 0;
    /// Population of a freshly entered field.
    pub const POPULATION: u32 = 1;
    /// Replication rolls within a turn.
    pub const REPLICATION: u32 = 2;
    /// Player start position.
    pub const START: u32 = 3;
}

/// Creates a generator for one sub-stream of the session.
pub fn stream_rng(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> GameRng {
    GameRng::seed_from_u64(compute_seed(game_seed, nonce, actor_id, context))
}

/// Compute deterministic seed from game state components.
///
/// # Arguments
///
/// * `game_seed` - Base seed set at game start
/// * `nonce` - Sequence number (turn counter, field visit counter)
/// * `actor_id` - Entity the roll belongs to
/// * `context` - One of the [`stream`] identifiers
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64 and FxHash multipliers
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor_id).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
