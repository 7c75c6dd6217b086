//! Per-enemy behaviour states and their transitions.
//!
//! Each enemy is in exactly one [`EnemyState`]. Every turn the engine asks the
//! state for a destination (unless the enemy is confused) and afterwards calls
//! [`EnemyState::should_transition`] to move to the next state.

use rand::Rng;

use super::strategy::{MovementStrategy, greedy_step};
use crate::config::AiConfig;
use crate::state::{Entity, GameField, Position};

/// Patrol around a fixed centre.
///
/// Route points are laid out lazily on the first move because they depend on
/// the field's terrain.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatrolRoute {
    pub center: Position,
    pub radius: u32,
    /// Turns after which the patrol ends.
    pub duration: u32,
    /// Turns spent at each point before heading to the next.
    pub dwell: u32,
    points: Option<Vec<Position>>,
    index: usize,
    dwelled: u32,
    elapsed: u32,
    last_health: u32,
}

impl PatrolRoute {
    pub fn new(center: Position, radius: u32, duration: u32, dwell: u32, health: u32) -> Self {
        Self {
            center,
            radius,
            duration,
            dwell,
            points: None,
            index: 0,
            dwelled: 0,
            elapsed: 0,
            last_health: health,
        }
    }

    /// Route points once laid out: the centre followed by the four compass
    /// points at `radius`, keeping only terrain-passable cells.
    pub fn points(&self) -> Option<&[Position]> {
        self.points.as_deref()
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn current_point(&self) -> Option<Position> {
        self.points.as_ref()?.get(self.index).copied()
    }

    fn lay_out(&mut self, field: &GameField) {
        let r = self.radius as i32;
        let candidates = [
            self.center,
            self.center.offset(0, -r),
            self.center.offset(r, 0),
            self.center.offset(0, r),
            self.center.offset(-r, 0),
        ];
        let mut points: Vec<Position> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if field.is_passable(candidate) && !points.contains(&candidate) {
                points.push(candidate);
            }
        }
        self.points = Some(points);
    }

    fn advance(&mut self, len: usize) {
        self.index = (self.index + 1) % len.max(1);
        self.dwelled = 0;
    }

    fn next_position<R: Rng + ?Sized>(
        &mut self,
        actor: &Entity,
        player: Position,
        field: &GameField,
        strategy: &mut MovementStrategy,
        rng: &mut R,
    ) -> Position {
        self.elapsed += 1;
        if self.points.is_none() {
            self.lay_out(field);
        }

        let len = self.points.as_ref().map_or(0, Vec::len);
        let Some(target) = self.current_point() else {
            return strategy.next_position(actor.position, player, field, rng);
        };

        if actor.position == target {
            self.dwelled += 1;
            if self.dwelled >= self.dwell {
                self.advance(len);
            }
            return actor.position;
        }

        let next = greedy_step(
            field,
            actor.position,
            target.x - actor.position.x,
            target.y - actor.position.y,
        );
        if next == actor.position {
            self.advance(len);
        }
        next
    }
}

/// Behaviour state of one enemy.
#[derive(Clone, Debug, PartialEq, Eq, Default, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyState {
    /// Follows the assigned strategy.
    #[default]
    Normal,
    /// Flees from the player, remembering where it last saw them.
    Panic { last_contact: Option<Position> },
    /// Heads for a remembered position.
    Tracking {
        target: Position,
        give_up_distance: u32,
    },
    Patrol(PatrolRoute),
}

impl EnemyState {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Destination for this turn.
    ///
    /// `strategy` is the enemy's assigned strategy; states that defer to it
    /// (Normal, Tracking on arrival, an empty patrol route) call it directly.
    pub fn next_position<R: Rng + ?Sized>(
        &mut self,
        actor: &Entity,
        player: Position,
        field: &GameField,
        strategy: &mut MovementStrategy,
        rng: &mut R,
    ) -> Position {
        match self {
            EnemyState::Normal => strategy.next_position(actor.position, player, field, rng),
            EnemyState::Panic { .. } => {
                self.observe(player);
                MovementStrategy::Retreat.next_position(actor.position, player, field, rng)
            }
            EnemyState::Tracking { target, .. } => {
                if actor.position == *target {
                    strategy.next_position(actor.position, player, field, rng)
                } else {
                    MovementStrategy::Approach.next_position(actor.position, *target, field, rng)
                }
            }
            EnemyState::Patrol(route) => route.next_position(actor, player, field, strategy, rng),
        }
    }

    /// Records the player's position as seen this turn.
    ///
    /// Only a panicking enemy remembers it; the contact becomes the tracking
    /// target once it recovers.
    pub fn observe(&mut self, player: Position) {
        if let EnemyState::Panic { last_contact } = self {
            *last_contact = Some(player);
        }
    }

    /// Evaluates the transition rules once. Returns the next state, if any.
    pub fn should_transition(&mut self, actor: &Entity, ai: &AiConfig) -> Option<EnemyState> {
        let ratio = actor.stats.health_ratio();
        let panicking = ratio <= ai.panic_threshold;

        match self {
            EnemyState::Normal => {
                panicking.then_some(EnemyState::Panic { last_contact: None })
            }
            EnemyState::Panic { last_contact } => {
                (ratio >= ai.recovery_threshold).then(|| EnemyState::Tracking {
                    target: last_contact.unwrap_or(actor.position),
                    give_up_distance: ai.tracking_give_up_distance,
                })
            }
            EnemyState::Tracking {
                target,
                give_up_distance,
            } => {
                if panicking {
                    return Some(EnemyState::Panic { last_contact: None });
                }
                let limit = i64::from(*give_up_distance);
                if actor.position.distance_squared(*target) > limit * limit {
                    return Some(EnemyState::Normal);
                }
                (actor.position == *target).then(|| {
                    EnemyState::Patrol(PatrolRoute::new(
                        *target,
                        ai.patrol_radius,
                        ai.patrol_duration,
                        ai.patrol_dwell,
                        actor.stats.health,
                    ))
                })
            }
            EnemyState::Patrol(route) => {
                if panicking {
                    return Some(EnemyState::Panic { last_contact: None });
                }
                let damaged = actor.stats.health < route.last_health;
                route.last_health = actor.stats.health;
                if damaged || route.elapsed >= route.duration {
                    return Some(EnemyState::Normal);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::env::GameRng;
    use crate::state::{EnemyProfile, EntityId, EntityKind, FieldCoord, TileKind};
    use crate::stats::GameStats;

    fn enemy_at(position: Position, health: u32) -> Entity {
        let mut stats = GameStats::new(100, 5, 0);
        stats.health = health;
        Entity {
            id: EntityId(1),
            kind: EntityKind::Enemy(EnemyProfile::new(10, None)),
            position,
            stats,
            name: "Goblin".into(),
            symbol: 'g',
        }
    }

    fn plain_field(size: u32) -> GameField {
        let last = size as i32 - 1;
        let kinds = (0..size as i32).flat_map(move |y| {
            (0..size as i32).map(move |x| match (x == 0 || x == last, y == 0 || y == last) {
                (true, true) => TileKind::Wall,
                (false, true) if y == 0 => TileKind::ExitUp,
                (false, true) => TileKind::ExitDown,
                (true, false) if x == 0 => TileKind::ExitLeft,
                (true, false) => TileKind::ExitRight,
                (false, false) => TileKind::Field,
            })
        });
        GameField::from_kinds(FieldCoord::new(0, 0), size, size, kinds)
    }

    #[test]
    fn normal_panics_at_threshold() {
        let ai = AiConfig::default();
        let mut state = EnemyState::Normal;
        assert_eq!(state.should_transition(&enemy_at(Position::new(1, 1), 31), &ai), None);
        assert_eq!(
            state.should_transition(&enemy_at(Position::new(1, 1), 30), &ai),
            Some(EnemyState::Panic { last_contact: None })
        );
    }

    #[test]
    fn panic_recovers_into_tracking_last_contact() {
        let ai = AiConfig::default();
        let field = plain_field(12);
        let mut rng = GameRng::seed_from_u64(1);
        let enemy = enemy_at(Position::new(5, 5), 20);
        let mut state = EnemyState::Panic { last_contact: None };

        state.next_position(
            &enemy,
            Position::new(3, 5),
            &field,
            &mut MovementStrategy::Hold,
            &mut rng,
        );
        assert_eq!(state.should_transition(&enemy, &ai), None);

        let healed = enemy_at(Position::new(6, 5), 50);
        assert_eq!(
            state.should_transition(&healed, &ai),
            Some(EnemyState::Tracking {
                target: Position::new(3, 5),
                give_up_distance: 10
            })
        );
    }

    #[test]
    fn panic_without_contact_tracks_own_position() {
        let ai = AiConfig::default();
        let enemy = enemy_at(Position::new(4, 4), 80);
        let mut state = EnemyState::Panic { last_contact: None };
        assert_eq!(
            state.should_transition(&enemy, &ai),
            Some(EnemyState::Tracking {
                target: Position::new(4, 4),
                give_up_distance: 10
            })
        );
    }

    #[test]
    fn observe_only_updates_panic() {
        let player = Position::new(2, 7);
        let mut panic = EnemyState::Panic {
            last_contact: Some(Position::new(9, 9)),
        };
        panic.observe(player);
        assert_eq!(
            panic,
            EnemyState::Panic {
                last_contact: Some(player)
            }
        );

        let mut normal = EnemyState::Normal;
        normal.observe(player);
        assert_eq!(normal, EnemyState::Normal);

        let tracking = EnemyState::Tracking {
            target: Position::new(4, 4),
            give_up_distance: 10,
        };
        let mut observed = tracking.clone();
        observed.observe(player);
        assert_eq!(observed, tracking);
    }

    #[test]
    fn tracking_transitions() {
        let ai = AiConfig::default();
        let target = Position::new(5, 5);
        let mut state = EnemyState::Tracking {
            target,
            give_up_distance: 10,
        };

        assert_eq!(
            state.should_transition(&enemy_at(Position::new(5, 6), 25), &ai),
            Some(EnemyState::Panic { last_contact: None })
        );
        assert_eq!(
            state.should_transition(&enemy_at(Position::new(5, 16), 90), &ai),
            Some(EnemyState::Normal)
        );
        assert_eq!(state.should_transition(&enemy_at(Position::new(5, 15), 90), &ai), None);
        assert!(matches!(
            state.should_transition(&enemy_at(target, 90), &ai),
            Some(EnemyState::Patrol(route)) if route.center == target && route.radius == 5
        ));
    }

    #[test]
    fn tracking_steps_toward_target() {
        let field = plain_field(12);
        let mut state = EnemyState::Tracking {
            target: Position::new(8, 2),
            give_up_distance: 10,
        };
        let next = state.next_position(
            &enemy_at(Position::new(2, 2), 90),
            Position::new(1, 1),
            &field,
            &mut MovementStrategy::Hold,
            &mut GameRng::seed_from_u64(3),
        );
        assert_eq!(next, Position::new(3, 2));
    }

    #[test]
    fn patrol_ends_when_damaged() {
        let ai = AiConfig::default();
        let mut state = EnemyState::Patrol(PatrolRoute::new(Position::new(5, 5), 5, 15, 3, 90));
        assert_eq!(state.should_transition(&enemy_at(Position::new(5, 5), 90), &ai), None);
        assert_eq!(
            state.should_transition(&enemy_at(Position::new(5, 5), 85), &ai),
            Some(EnemyState::Normal)
        );
    }

    #[test]
    fn patrol_panic_preempts_damage_rule() {
        let ai = AiConfig::default();
        let mut state = EnemyState::Patrol(PatrolRoute::new(Position::new(5, 5), 5, 15, 3, 90));
        assert_eq!(
            state.should_transition(&enemy_at(Position::new(5, 5), 10), &ai),
            Some(EnemyState::Panic { last_contact: None })
        );
    }

    #[test]
    fn patrol_dwells_then_heads_to_next_point() {
        let field = plain_field(14);
        let center = Position::new(6, 6);
        let mut route = PatrolRoute::new(center, 3, 15, 3, 90);
        let mut strategy = MovementStrategy::Hold;
        let mut rng = GameRng::seed_from_u64(5);
        let enemy = enemy_at(center, 90);

        for _ in 0..3 {
            let next = route.next_position(&enemy, Position::new(1, 1), &field, &mut strategy, &mut rng);
            assert_eq!(next, center);
        }
        assert_eq!(
            route.points().map(<[Position]>::len),
            Some(5),
            "all compass points are inside a 14x14 field"
        );
        assert_eq!(route.current_point(), Some(Position::new(6, 3)));

        let next = route.next_position(&enemy, Position::new(1, 1), &field, &mut strategy, &mut rng);
        assert_eq!(next, Position::new(6, 5));
        assert_eq!(route.elapsed(), 4);
    }

    #[test]
    fn patrol_expires_after_duration() {
        let ai = AiConfig::default();
        let field = plain_field(14);
        let center = Position::new(6, 6);
        let enemy = enemy_at(center, 90);
        let mut state = EnemyState::Patrol(PatrolRoute::new(center, 3, 2, 3, 90));
        let mut rng = GameRng::seed_from_u64(5);

        for _ in 0..2 {
            state.next_position(&enemy, Position::new(1, 1), &field, &mut MovementStrategy::Hold, &mut rng);
        }
        assert_eq!(state.should_transition(&enemy, &ai), Some(EnemyState::Normal));
    }

    #[test]
    fn empty_route_defers_to_strategy() {
        let field = plain_field(6);
        // Centre far outside the field: no passable point survives.
        let mut route = PatrolRoute::new(Position::new(40, 40), 2, 15, 3, 90);
        let enemy = enemy_at(Position::new(2, 2), 90);
        let next = route.next_position(
            &enemy,
            Position::new(4, 2),
            &field,
            &mut MovementStrategy::Approach,
            &mut GameRng::seed_from_u64(5),
        );
        assert_eq!(route.points(), Some(&[][..]));
        assert_eq!(next, Position::new(3, 2));
    }
}
