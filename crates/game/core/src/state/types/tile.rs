use super::{Direction, EntityId, Position};

/// Terrain classes a tile can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    Wall,
    Mountain,
    River,
    Field,
    Forest,
    Beach,
    ExitUp,
    ExitRight,
    ExitDown,
    ExitLeft,
    /// Border cell sealed because the far side of the seam is hazardous.
    NoWay,
}

impl TileKind {
    /// Terrain that nothing may enter or spawn on.
    pub fn is_hazard(self) -> bool {
        matches!(self, TileKind::Mountain | TileKind::River)
    }

    /// Walkable interior biome.
    pub fn is_passable(self) -> bool {
        matches!(self, TileKind::Field | TileKind::Forest | TileKind::Beach)
    }

    pub fn is_exit(self) -> bool {
        self.exit_direction().is_some()
    }

    /// Border markers: any exit or the sealed no-way cell.
    pub fn is_border_marker(self) -> bool {
        self.is_exit() || self == TileKind::NoWay
    }

    pub fn exit_direction(self) -> Option<Direction> {
        match self {
            TileKind::ExitUp => Some(Direction::Up),
            TileKind::ExitRight => Some(Direction::Right),
            TileKind::ExitDown => Some(Direction::Down),
            TileKind::ExitLeft => Some(Direction::Left),
            _ => None,
        }
    }

    pub fn exit_toward(direction: Direction) -> Self {
        match direction {
            Direction::Up => TileKind::ExitUp,
            Direction::Right => TileKind::ExitRight,
            Direction::Down => TileKind::ExitDown,
            Direction::Left => TileKind::ExitLeft,
        }
    }

    /// Single-character glyph for plain-text dumps.
    pub fn glyph(self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Mountain => '^',
            TileKind::River => '~',
            TileKind::Field => '.',
            TileKind::Forest => 'T',
            TileKind::Beach => ',',
            TileKind::ExitUp | TileKind::ExitRight | TileKind::ExitDown | TileKind::ExitLeft => {
                '+'
            }
            TileKind::NoWay => 'x',
        }
    }
}

/// One cell of a field.
///
/// `occupant` is a non-owning back-reference into the entity roster kept for
/// O(1) occupancy checks; the engine updates it together with the entity's
/// own position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub kind: TileKind,
    pub position: Position,
    pub occupant: Option<EntityId>,
}

impl Tile {
    pub const fn new(kind: TileKind, position: Position) -> Self {
        Self {
            kind,
            position,
            occupant: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}
