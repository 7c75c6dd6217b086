//! Single-step movement policies shared by every enemy.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::state::{GameField, Position};

/// Euclidean distance within which [`MovementStrategy::Retreat`] flees.
pub const RETREAT_RADIUS: u32 = 5;

/// Single-step movement policy of an enemy.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementStrategy {
    /// Close in on the target.
    Approach,
    /// Never move.
    Hold,
    /// Step away from a target within [`RETREAT_RADIUS`].
    Retreat,
    /// Random wandering for `remaining` moves, then `inner`.
    Randomized {
        inner: Box<MovementStrategy>,
        remaining: u32,
    },
}

impl MovementStrategy {
    /// The three plain strategies enemies are assigned at spawn.
    pub const BASIC: [MovementStrategy; 3] = [
        MovementStrategy::Approach,
        MovementStrategy::Hold,
        MovementStrategy::Retreat,
    ];

    pub fn randomized(inner: MovementStrategy, remaining: u32) -> Self {
        MovementStrategy::Randomized {
            inner: Box::new(inner),
            remaining,
        }
    }

    /// Uniform pick among [`MovementStrategy::BASIC`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let index = rng.gen_range(0..Self::BASIC.len());
        Self::BASIC[index].clone()
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// True while a randomized wrapper still has moves left.
    pub fn is_randomizing(&self) -> bool {
        matches!(self, MovementStrategy::Randomized { remaining, .. } if *remaining > 0)
    }

    /// Chooses the next cell for `actor` given `target`.
    ///
    /// Returns `actor` itself when the policy decides to stay or no move is
    /// possible. Only [`MovementStrategy::Randomized`] mutates itself.
    pub fn next_position<R: Rng + ?Sized>(
        &mut self,
        actor: Position,
        target: Position,
        field: &GameField,
        rng: &mut R,
    ) -> Position {
        match self {
            MovementStrategy::Approach => {
                greedy_step(field, actor, target.x - actor.x, target.y - actor.y)
            }
            MovementStrategy::Hold => actor,
            MovementStrategy::Retreat => {
                let radius = i64::from(RETREAT_RADIUS);
                if actor.distance_squared(target) > radius * radius {
                    return actor;
                }
                greedy_step(field, actor, actor.x - target.x, actor.y - target.y)
            }
            MovementStrategy::Randomized { inner, remaining } => {
                if *remaining == 0 {
                    return inner.next_position(actor, target, field, rng);
                }
                *remaining -= 1;
                random_step(field, actor, rng)
            }
        }
    }
}

/// One step from `from` along the signs of `(dx, dy)`.
///
/// The axis with the larger magnitude is tried first (ties go vertical), then
/// the other axis. Axes with zero delta are skipped. Returns `from` when
/// neither step is walkable.
pub fn greedy_step(field: &GameField, from: Position, dx: i32, dy: i32) -> Position {
    let horizontal = (dx != 0).then(|| from.offset(dx.signum(), 0));
    let vertical = (dy != 0).then(|| from.offset(0, dy.signum()));

    let order = if dx.abs() > dy.abs() {
        [horizontal, vertical]
    } else {
        [vertical, horizontal]
    };

    order
        .into_iter()
        .flatten()
        .find(|candidate| field.is_walkable(*candidate))
        .unwrap_or(from)
}

/// First walkable cell among the eight shuffled neighbours, or `from`.
fn random_step<R: Rng + ?Sized>(field: &GameField, from: Position, rng: &mut R) -> Position {
    let mut candidates = from.surrounding();
    candidates.shuffle(rng);
    candidates
        .into_iter()
        .find(|candidate| field.is_walkable(*candidate))
        .unwrap_or(from)
}
