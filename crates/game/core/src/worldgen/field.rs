//! Terrain painting for a single field.

use super::noise::PerlinNoise;
use crate::config::TerrainConfig;
use crate::error::MapError;
use crate::state::{Direction, FieldCoord, GameField, Position, Tile, TileKind};

/// Paints fields from two independent noise sources: height and biome.
///
/// Interior cells are sampled at global coordinates so neighbouring fields
/// continue each other's terrain; border cells look across the seam to decide
/// between an exit and a sealed `NoWay` cell.
#[derive(Clone, Debug)]
pub struct FieldGenerator {
    width: u32,
    height: u32,
    config: TerrainConfig,
    height_noise: PerlinNoise,
    biome_noise: PerlinNoise,
}

impl FieldGenerator {
    /// Creates a generator for `width x height` fields.
    ///
    /// Fails with [`MapError::FieldTooSmall`] unless both sides are at least 3.
    pub fn new(width: u32, height: u32, config: TerrainConfig) -> Result<Self, MapError> {
        if width < 3 || height < 3 {
            return Err(MapError::FieldTooSmall { width, height });
        }
        Ok(Self {
            width,
            height,
            height_noise: PerlinNoise::new(config.height_seed),
            biome_noise: PerlinNoise::new(config.biome_seed),
            config,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Generates the complete field at `coord`.
    pub fn generate(&self, coord: FieldCoord) -> GameField {
        let mut tiles = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let position = Position::new(x, y);
                tiles.push(Tile::new(self.tile_kind(coord, position), position));
            }
        }
        GameField::new(coord, self.width, self.height, tiles)
    }

    fn tile_kind(&self, coord: FieldCoord, position: Position) -> TileKind {
        let right = self.width as i32 - 1;
        let bottom = self.height as i32 - 1;
        let Position { x, y } = position;

        let on_vertical_edge = x == 0 || x == right;
        let on_horizontal_edge = y == 0 || y == bottom;
        if on_vertical_edge && on_horizontal_edge {
            return TileKind::Wall;
        }

        let seam = if y == 0 {
            Some((Direction::Up, Position::new(x, bottom - 1)))
        } else if y == bottom {
            Some((Direction::Down, Position::new(x, 1)))
        } else if x == 0 {
            Some((Direction::Left, Position::new(right - 1, y)))
        } else if x == right {
            Some((Direction::Right, Position::new(1, y)))
        } else {
            None
        };

        match seam {
            Some((side, mirrored)) => {
                let across = self.interior_kind(coord.neighbor(side), mirrored);
                if across.is_hazard() {
                    TileKind::NoWay
                } else {
                    TileKind::exit_toward(side)
                }
            }
            None => self.interior_kind(coord, position),
        }
    }

    /// Terrain the field at `coord` has (or would have) at interior cell
    /// `position`. Coordinates outside any map are sampled as-is.
    pub fn interior_kind(&self, coord: FieldCoord, position: Position) -> TileKind {
        let gx = coord.x as f64 * f64::from(self.width - 2) + f64::from(position.x - 1);
        let gy = coord.y as f64 * f64::from(self.height - 2) + f64::from(position.y - 1);
        let scale = self.config.scale;

        let raw_height = self.height_noise.octave_noise(
            gx * scale,
            gy * scale,
            self.config.octaves,
            self.config.persistence,
        );
        let raw_biome = self.biome_noise.noise(gx * scale, gy * scale);

        let height = (raw_height * 0.5 + 0.5).powf(self.config.exponent);
        let biome = raw_biome * 0.5 + 0.5;
        classify(biome, height)
    }
}

/// Maps normalised biome and height values to terrain.
pub fn classify(biome: f64, height: f64) -> TileKind {
    if biome < 0.33 {
        if height < 0.10 {
            TileKind::River
        } else if height < 0.25 {
            TileKind::Beach
        } else if height < 0.50 {
            TileKind::Field
        } else {
            TileKind::Forest
        }
    } else if biome < 0.66 {
        if height < 0.25 {
            TileKind::Field
        } else if height < 0.60 {
            TileKind::Forest
        } else {
            TileKind::Mountain
        }
    } else if height < 0.25 {
        TileKind::Field
    } else if height < 0.50 {
        TileKind::Forest
    } else {
        TileKind::Mountain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_bands() {
        assert_eq!(classify(0.1, 0.05), TileKind::River);
        assert_eq!(classify(0.1, 0.2), TileKind::Beach);
        assert_eq!(classify(0.1, 0.4), TileKind::Field);
        assert_eq!(classify(0.1, 0.9), TileKind::Forest);
        assert_eq!(classify(0.5, 0.1), TileKind::Field);
        assert_eq!(classify(0.5, 0.5), TileKind::Forest);
        assert_eq!(classify(0.5, 0.6), TileKind::Mountain);
        assert_eq!(classify(0.9, 0.2), TileKind::Field);
        assert_eq!(classify(0.9, 0.49), TileKind::Forest);
        assert_eq!(classify(0.9, 0.5), TileKind::Mountain);
    }

    #[test]
    fn interior_continues_across_fields() {
        let generator = FieldGenerator::new(12, 9, TerrainConfig::default()).unwrap();
        let left = generator.generate(FieldCoord::new(0, 0));

        // Column 10 of field (0, 0) and column 0 of field (1, 0) share a
        // global x coordinate.
        for y in 1..8 {
            let expected = generator.interior_kind(FieldCoord::new(1, 0), Position::new(0, y));
            assert_eq!(left.kind_at(Position::new(10, y)), Some(expected));
        }
    }

    #[test]
    fn undersized_fields_are_rejected() {
        for (width, height) in [(0, 5), (1, 1), (2, 9), (8, 2)] {
            assert_eq!(
                FieldGenerator::new(width, height, TerrainConfig::default()).err(),
                Some(MapError::FieldTooSmall { width, height })
            );
        }
    }

    #[test]
    fn smallest_field_is_all_border() {
        let generator = FieldGenerator::new(3, 3, TerrainConfig::default()).unwrap();
        let field = generator.generate(FieldCoord::new(4, 4));
        assert_eq!(field.validate_border(), Ok(()));
        assert_eq!(field.kind_at(Position::new(0, 0)), Some(TileKind::Wall));
    }
}
