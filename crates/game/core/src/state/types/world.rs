use super::{Direction, EntityId, FieldCoord, Position, Tile, TileKind};
use crate::error::MapError;

/// One navigable screen of the map: a row-major grid of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameField {
    pub width: u32,
    pub height: u32,
    pub position: FieldCoord,
    tiles: Vec<Tile>,
}

impl GameField {
    /// Wraps an already laid-out tile grid. Shape and border are checked by
    /// [`GameMap::new`].
    pub fn new(position: FieldCoord, width: u32, height: u32, tiles: Vec<Tile>) -> Self {
        Self {
            width,
            height,
            position,
            tiles,
        }
    }

    /// Builds a field from terrain kinds listed row by row.
    pub fn from_kinds(
        position: FieldCoord,
        width: u32,
        height: u32,
        kinds: impl IntoIterator<Item = TileKind>,
    ) -> Self {
        let w = width.max(1) as usize;
        let tiles = kinds
            .into_iter()
            .enumerate()
            .map(|(index, kind)| {
                let cell = Position::new((index % w) as i32, (index / w) as i32);
                Tile::new(kind, cell)
            })
            .collect();
        Self::new(position, width, height, tiles)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.index(position).and_then(|index| self.tiles.get(index))
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.index(position)
            .and_then(move |index| self.tiles.get_mut(index))
    }

    pub fn kind_at(&self, position: Position) -> Option<TileKind> {
        self.tile(position).map(|tile| tile.kind)
    }

    pub fn occupant_at(&self, position: Position) -> Option<EntityId> {
        self.tile(position).and_then(|tile| tile.occupant)
    }

    /// True when a mover may step onto `position`: in bounds, passable
    /// interior terrain and no occupant.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.tile(position)
            .is_some_and(|tile| tile.kind.is_passable() && tile.occupant.is_none())
    }

    /// Passable terrain regardless of occupancy.
    pub fn is_passable(&self, position: Position) -> bool {
        self.kind_at(position).is_some_and(TileKind::is_passable)
    }

    /// Sets the occupant of a tile. Returns false when `position` is outside the field.
    pub fn set_occupant(&mut self, position: Position, occupant: Option<EntityId>) -> bool {
        match self.tile_mut(position) {
            Some(tile) => {
                tile.occupant = occupant;
                true
            }
            None => false,
        }
    }

    pub fn clear_occupants(&mut self) {
        for tile in &mut self.tiles {
            tile.occupant = None;
        }
    }

    /// Every currently walkable cell in row-major order.
    pub fn walkable_cells(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .filter(|tile| tile.kind.is_passable() && tile.occupant.is_none())
            .map(|tile| tile.position)
            .collect()
    }

    pub fn is_corner(&self, position: Position) -> bool {
        let right = self.width as i32 - 1;
        let bottom = self.height as i32 - 1;
        (position.x == 0 || position.x == right) && (position.y == 0 || position.y == bottom)
    }

    pub fn is_border(&self, position: Position) -> bool {
        position.x == 0
            || position.y == 0
            || position.x == self.width as i32 - 1
            || position.y == self.height as i32 - 1
    }

    /// Edge a border cell belongs to; `None` for corners and interior cells.
    pub fn border_side(&self, position: Position) -> Option<Direction> {
        if self.is_corner(position) {
            return None;
        }
        if position.y == 0 {
            Some(Direction::Up)
        } else if position.y == self.height as i32 - 1 {
            Some(Direction::Down)
        } else if position.x == 0 {
            Some(Direction::Left)
        } else if position.x == self.width as i32 - 1 {
            Some(Direction::Right)
        } else {
            None
        }
    }

    /// Checks the border layout: walls in the corners, the matching exit
    /// marker or `NoWay` along each edge, and no markers inside.
    pub fn validate_border(&self) -> Result<(), MapError> {
        for tile in &self.tiles {
            let position = tile.position;
            let valid = if self.is_corner(position) {
                tile.kind == TileKind::Wall
            } else if let Some(side) = self.border_side(position) {
                tile.kind == TileKind::NoWay || tile.kind == TileKind::exit_toward(side)
            } else {
                !tile.kind.is_border_marker()
            };

            if !valid {
                return Err(MapError::InvalidBorder {
                    field: self.position,
                    position,
                });
            }
        }
        Ok(())
    }

    /// Checks tile count and per-tile positions.
    fn validate_shape(&self) -> Result<(), MapError> {
        let expected = self.width as usize * self.height as usize;
        if self.tiles.len() != expected {
            return Err(MapError::TileCountMismatch {
                field: self.position,
                expected,
                actual: self.tiles.len(),
            });
        }

        let width = self.width as usize;
        for (index, tile) in self.tiles.iter().enumerate() {
            let expected = Position::new((index % width) as i32, (index / width) as i32);
            if tile.position != expected {
                return Err(MapError::TilePositionMismatch {
                    field: self.position,
                    index,
                    found: tile.position,
                });
            }
        }
        Ok(())
    }

    /// Plain-text dump, one glyph per tile; `overlay` may replace a glyph.
    pub fn render(&self, overlay: impl Fn(Position) -> Option<char>) -> String {
        let mut out = String::with_capacity(self.tiles.len() + self.height as usize);
        for row in self.tiles.chunks(self.width.max(1) as usize) {
            for tile in row {
                out.push(overlay(tile.position).unwrap_or_else(|| tile.kind.glyph()));
            }
            out.push('\n');
        }
        out
    }
}

/// Dense grid of fields, indexed row-major by [`FieldCoord`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameMap {
    pub width: u32,
    pub height: u32,
    fields: Vec<GameField>,
}

impl GameMap {
    /// Validates and assembles a map.
    ///
    /// Every field must sit at the index matching its coordinate, share the
    /// dimensions of the first field, and satisfy the border layout.
    pub fn new(width: u32, height: u32, fields: Vec<GameField>) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::EmptyMap { width, height });
        }

        let expected = width as usize * height as usize;
        if fields.len() != expected {
            return Err(MapError::FieldCountMismatch {
                expected,
                actual: fields.len(),
            });
        }

        let (field_width, field_height) = (fields[0].width, fields[0].height);
        if field_width < 3 || field_height < 3 {
            return Err(MapError::FieldTooSmall {
                width: field_width,
                height: field_height,
            });
        }

        for (index, field) in fields.iter().enumerate() {
            let coord = FieldCoord::new(
                (index % width as usize) as i32,
                (index / width as usize) as i32,
            );
            if field.position != coord {
                return Err(MapError::FieldCoordMismatch {
                    index,
                    expected: coord,
                    found: field.position,
                });
            }
            if field.width != field_width || field.height != field_height {
                return Err(MapError::FieldSizeMismatch {
                    field: coord,
                    width: field_width,
                    height: field_height,
                    found_width: field.width,
                    found_height: field.height,
                });
            }
            field.validate_shape()?;
            field.validate_border()?;
        }

        Ok(Self {
            width,
            height,
            fields,
        })
    }

    pub fn fields(&self) -> &[GameField] {
        &self.fields
    }

    pub fn field_width(&self) -> u32 {
        self.fields.first().map_or(0, |field| field.width)
    }

    pub fn field_height(&self) -> u32 {
        self.fields.first().map_or(0, |field| field.height)
    }

    pub fn contains(&self, coord: FieldCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height
    }

    fn index(&self, coord: FieldCoord) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.y as usize * self.width as usize + coord.x as usize)
    }

    pub fn field(&self, coord: FieldCoord) -> Option<&GameField> {
        self.index(coord).and_then(|index| self.fields.get(index))
    }

    pub fn field_mut(&mut self, coord: FieldCoord) -> Option<&mut GameField> {
        self.index(coord)
            .and_then(move |index| self.fields.get_mut(index))
    }

    fn clamp(&self, coord: FieldCoord) -> FieldCoord {
        FieldCoord::new(
            coord.x.clamp(0, self.width as i32 - 1),
            coord.y.clamp(0, self.height as i32 - 1),
        )
    }

    /// Field at `coord` after clamping it into the map; total because a map
    /// always holds at least one field.
    pub fn field_clamped(&self, coord: FieldCoord) -> &GameField {
        let coord = self.clamp(coord);
        &self.fields[coord.y as usize * self.width as usize + coord.x as usize]
    }

    pub fn field_clamped_mut(&mut self, coord: FieldCoord) -> &mut GameField {
        let coord = self.clamp(coord);
        let index = coord.y as usize * self.width as usize + coord.x as usize;
        &mut self.fields[index]
    }

    /// Field coordinate one step in `direction`, clamped to the map.
    pub fn neighbor(&self, coord: FieldCoord, direction: Direction) -> FieldCoord {
        self.clamp(coord.neighbor(direction))
    }

    pub fn center(&self) -> FieldCoord {
        FieldCoord::new((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3 field with exits on every edge and a single field interior cell.
    fn tiny_field(position: FieldCoord) -> GameField {
        use TileKind::*;
        GameField::from_kinds(
            position,
            3,
            3,
            [
                Wall, ExitUp, Wall, //
                ExitLeft, Field, ExitRight, //
                Wall, ExitDown, Wall,
            ],
        )
    }

    #[test]
    fn walkability_respects_terrain_and_occupancy() {
        let mut field = tiny_field(FieldCoord::new(0, 0));
        let center = Position::new(1, 1);

        assert!(field.is_walkable(center));
        assert!(!field.is_walkable(Position::new(1, 0)));
        assert!(!field.is_walkable(Position::new(-1, 1)));

        field.set_occupant(center, Some(EntityId(3)));
        assert!(!field.is_walkable(center));
        assert!(field.is_passable(center));
    }

    #[test]
    fn validate_border_rejects_interior_exit() {
        use TileKind::*;
        let field = GameField::from_kinds(
            FieldCoord::new(0, 0),
            3,
            3,
            [Wall, ExitUp, Wall, ExitLeft, ExitUp, ExitRight, Wall, ExitDown, Wall],
        );
        assert_eq!(
            field.validate_border(),
            Err(MapError::InvalidBorder {
                field: FieldCoord::new(0, 0),
                position: Position::new(1, 1),
            })
        );
    }

    #[test]
    fn validate_border_rejects_mismatched_exit() {
        use TileKind::*;
        let field = GameField::from_kinds(
            FieldCoord::new(0, 0),
            3,
            3,
            [Wall, ExitDown, Wall, ExitLeft, Field, ExitRight, Wall, ExitDown, Wall],
        );
        assert!(field.validate_border().is_err());
    }

    #[test]
    fn map_rejects_misplaced_field() {
        let fields = vec![tiny_field(FieldCoord::new(1, 0)), tiny_field(FieldCoord::new(0, 0))];
        assert!(matches!(
            GameMap::new(2, 1, fields),
            Err(MapError::FieldCoordMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn neighbor_is_clamped() {
        let fields = vec![tiny_field(FieldCoord::new(0, 0)), tiny_field(FieldCoord::new(1, 0))];
        let map = GameMap::new(2, 1, fields).expect("valid map");

        assert_eq!(
            map.neighbor(FieldCoord::new(0, 0), Direction::Up),
            FieldCoord::new(0, 0)
        );
        assert_eq!(
            map.neighbor(FieldCoord::new(0, 0), Direction::Right),
            FieldCoord::new(1, 0)
        );
        assert_eq!(
            map.neighbor(FieldCoord::new(1, 0), Direction::Right),
            FieldCoord::new(1, 0)
        );
    }

    #[test]
    fn render_uses_overlay() {
        let field = tiny_field(FieldCoord::new(0, 0));
        let text = field.render(|p| (p == Position::new(1, 1)).then_some('@'));
        assert_eq!(text, "#+#\n+@+\n#+#\n");
    }
}
