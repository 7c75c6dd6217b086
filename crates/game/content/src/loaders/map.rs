//! Static map loader.
//!
//! A map file lists every field as rows of glyphs, in row-major field order:
//!
//! ```text
//! (
//!     width: 1,
//!     height: 1,
//!     fields: [
//!         [
//!             "#+++#",
//!             "+.T.+",
//!             "+.^.+",
//!             "#+x+#",
//!         ],
//!     ],
//! )
//! ```
//!
//! `+` is an exit whose direction follows from the border it sits on. The
//! result goes through the same validation as generated maps.

use std::path::Path;

use anyhow::{Context, bail, ensure};
use game_core::{Direction, FieldCoord, GameField, GameMap, Position, TileKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Map file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    width: u32,
    height: u32,
    fields: Vec<Vec<String>>,
}

/// Loader for static maps from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a map from a RON file.
    pub fn load(path: &Path) -> LoadResult<GameMap> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid map {}", path.display()))
    }

    /// Parses RON text into a validated [`GameMap`].
    pub fn parse(content: &str) -> LoadResult<GameMap> {
        let data: MapDataRon = ron::from_str(content).context("Failed to parse map RON")?;
        ensure!(
            data.fields.len() == data.width as usize * data.height as usize,
            "expected {} fields, got {}",
            data.width as usize * data.height as usize,
            data.fields.len()
        );

        let mut fields = Vec::with_capacity(data.fields.len());
        for (index, rows) in data.fields.iter().enumerate() {
            let coord = FieldCoord::new(
                (index % data.width as usize) as i32,
                (index / data.width as usize) as i32,
            );
            let field = parse_field(coord, rows).with_context(|| format!("field {coord}"))?;
            fields.push(field);
        }

        Ok(GameMap::new(data.width, data.height, fields)?)
    }
}

fn parse_field(coord: FieldCoord, rows: &[String]) -> LoadResult<GameField> {
    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.chars().count());
    ensure!(height > 0 && width > 0, "field has no rows");

    let mut kinds = Vec::with_capacity(width * height);
    for (y, row) in rows.iter().enumerate() {
        ensure!(
            row.chars().count() == width,
            "row {y} has {} cells, expected {width}",
            row.chars().count()
        );
        for (x, glyph) in row.chars().enumerate() {
            let position = Position::new(x as i32, y as i32);
            let side = border_side(position, width, height);
            kinds.push(kind_from_glyph(glyph, side).with_context(|| format!("cell {position}"))?);
        }
    }

    Ok(GameField::from_kinds(coord, width as u32, height as u32, kinds))
}

/// Border a non-corner edge cell belongs to.
fn border_side(position: Position, width: usize, height: usize) -> Option<Direction> {
    let right = width as i32 - 1;
    let bottom = height as i32 - 1;
    match (position.x, position.y) {
        (x, 0) if x != 0 && x != right => Some(Direction::Up),
        (x, y) if y == bottom && x != 0 && x != right => Some(Direction::Down),
        (0, y) if y != 0 && y != bottom => Some(Direction::Left),
        (x, y) if x == right && y != 0 && y != bottom => Some(Direction::Right),
        _ => None,
    }
}

fn kind_from_glyph(glyph: char, side: Option<Direction>) -> LoadResult<TileKind> {
    let kind = match glyph {
        '#' => TileKind::Wall,
        '^' => TileKind::Mountain,
        '~' => TileKind::River,
        '.' => TileKind::Field,
        'T' => TileKind::Forest,
        ',' => TileKind::Beach,
        'x' => TileKind::NoWay,
        '+' => match side {
            Some(direction) => TileKind::exit_toward(direction),
            None => bail!("exit glyph off the border"),
        },
        other => bail!("unknown glyph {other:?}"),
    };
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const TWO_FIELDS: &str = r##"(
        width: 2,
        height: 1,
        fields: [
            ["#+++#", "+.T.+", "+.^.+", "#+x+#"],
            ["#+++#", "+,,~+", "+...+", "#+++#"],
        ],
    )"##;

    #[test]
    fn parses_glyphs_and_exit_directions() {
        let map = MapLoader::parse(TWO_FIELDS).expect("valid map");
        assert_eq!((map.width, map.height), (2, 1));
        assert_eq!((map.field_width(), map.field_height()), (5, 4));

        let field = map.field(FieldCoord::new(0, 0)).expect("first field");
        assert_eq!(field.kind_at(Position::new(2, 0)), Some(TileKind::ExitUp));
        assert_eq!(field.kind_at(Position::new(0, 1)), Some(TileKind::ExitLeft));
        assert_eq!(field.kind_at(Position::new(4, 2)), Some(TileKind::ExitRight));
        assert_eq!(field.kind_at(Position::new(2, 3)), Some(TileKind::NoWay));
        assert_eq!(field.kind_at(Position::new(2, 1)), Some(TileKind::Forest));
        assert_eq!(field.kind_at(Position::new(2, 2)), Some(TileKind::Mountain));

        let second = map.field(FieldCoord::new(1, 0)).expect("second field");
        assert_eq!(second.kind_at(Position::new(3, 1)), Some(TileKind::River));
    }

    #[test]
    fn rejects_interior_exit() {
        let text = r##"(width: 1, height: 1, fields: [["#+++#", "+.+.+", "#+++#"]])"##;
        let error = MapLoader::parse(text).expect_err("interior exit");
        assert!(format!("{error:#}").contains("exit glyph off the border"));
    }

    #[test]
    fn rejects_ragged_rows() {
        let text = r##"(width: 1, height: 1, fields: [["#+++#", "+..+", "#+++#"]])"##;
        assert!(MapLoader::parse(text).is_err());
    }

    #[test]
    fn rejects_wrong_field_count() {
        let text = r##"(width: 2, height: 1, fields: [["#+#", "+.+", "#+#"]])"##;
        assert!(MapLoader::parse(text).is_err());
    }

    #[test]
    fn rejects_open_corner() {
        let text = r##"(width: 1, height: 1, fields: [["++++", "+..+", "#++#"]])"##;
        let error = MapLoader::parse(text).expect_err("corner is not a wall");
        assert!(format!("{error:#}").contains("border"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(TWO_FIELDS.as_bytes()).expect("write map");
        let map = MapLoader::load(file.path()).expect("valid map");
        assert_eq!(map.fields().len(), 2);
    }
}
