//! Moving the player between fields.

use tracing::info;

use super::GameEngine;
use crate::state::{Direction, EntityId, FieldCoord, GameField, Position};

impl GameEngine {
    /// Abandons the current field and enters its neighbour across `exit`.
    ///
    /// The neighbour is clamped into the map, so an exit on the map edge
    /// leads back into the same field. The player arrives just inside the
    /// opposite border, in the same column or row, or on the nearest walkable
    /// cell when that one is taken.
    pub(super) fn enter_neighbor_field(&mut self, exit: Direction) -> (FieldCoord, Position) {
        let from = self.state.current_field;
        let previous = self.state.player_position();

        self.state.field_mut().clear_occupants();
        self.state.entities.clear_field();
        self.behaviors.clear();
        self.state.replicating.clear();

        let target = self.state.map.neighbor(from, exit);
        self.state.current_field = target;

        let field = self.state.field();
        let position = arrival_cell(field, previous, exit);
        self.state.entities.player.position = position;
        self.state.field_mut().set_occupant(position, Some(EntityId::PLAYER));

        self.populate_current_field();

        info!(
            from = %from,
            to = %target,
            position = %position,
            enemies = self.state.entities.enemies.len(),
            "entered field"
        );
        (target, position)
    }
}

/// Cell just inside the border opposite `exit`, falling back to the nearest
/// walkable cell.
fn arrival_cell(field: &GameField, previous: Position, exit: Direction) -> Position {
    let right = field.width as i32 - 2;
    let bottom = field.height as i32 - 2;
    let preferred = match exit {
        Direction::Up => Position::new(previous.x, bottom),
        Direction::Down => Position::new(previous.x, 1),
        Direction::Left => Position::new(right, previous.y),
        Direction::Right => Position::new(1, previous.y),
    };
    if field.is_walkable(preferred) {
        return preferred;
    }

    field
        .walkable_cells()
        .into_iter()
        .min_by_key(|cell| cell.distance_squared(preferred))
        .unwrap_or(preferred)
}
