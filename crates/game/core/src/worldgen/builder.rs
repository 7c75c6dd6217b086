//! Whole-map assembly from generated fields.

use tracing::debug;

use super::field::FieldGenerator;
use crate::config::{GameConfig, TerrainConfig};
use crate::error::MapError;
use crate::state::{FieldCoord, GameMap};

/// Assembles a grid of generated fields into a [`GameMap`].
#[derive(Clone, Debug)]
pub struct MapBuilder {
    width: u32,
    height: u32,
    field_width: u32,
    field_height: u32,
    terrain: TerrainConfig,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self {
            width: GameConfig::DEFAULT_MAP_SIZE,
            height: GameConfig::DEFAULT_MAP_SIZE,
            field_width: GameConfig::DEFAULT_FIELD_SIZE,
            field_height: GameConfig::DEFAULT_FIELD_SIZE,
            terrain: TerrainConfig::default(),
        }
    }

    /// Takes map and field dimensions and terrain from a session config.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new()
            .map_size(config.map_width, config.map_height)
            .field_size(config.field_width, config.field_height)
            .terrain(config.terrain.clone())
    }

    pub fn map_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn field_size(mut self, width: u32, height: u32) -> Self {
        self.field_width = width;
        self.field_height = height;
        self
    }

    pub fn terrain(mut self, terrain: TerrainConfig) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn seeds(mut self, height_seed: u64, biome_seed: u64) -> Self {
        self.terrain.height_seed = height_seed;
        self.terrain.biome_seed = biome_seed;
        self
    }

    pub fn build(&self) -> Result<GameMap, MapError> {
        let generator =
            FieldGenerator::new(self.field_width, self.field_height, self.terrain.clone())?;

        let mut fields = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                fields.push(generator.generate(FieldCoord::new(x, y)));
            }
        }

        debug!(
            width = self.width,
            height = self.height,
            field_width = self.field_width,
            field_height = self.field_height,
            "generated map"
        );

        GameMap::new(self.width, self.height, fields)
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_tiny_fields() {
        let result = MapBuilder::new().field_size(2, 10).build();
        assert_eq!(
            result,
            Err(MapError::FieldTooSmall {
                width: 2,
                height: 10
            })
        );
    }

    #[test]
    fn builds_dense_grid() {
        let map = MapBuilder::new()
            .map_size(3, 2)
            .field_size(8, 6)
            .build()
            .expect("map builds");

        assert_eq!(map.fields().len(), 6);
        assert_eq!(map.field_width(), 8);
        assert_eq!(
            map.field(FieldCoord::new(2, 1)).map(|f| f.position),
            Some(FieldCoord::new(2, 1))
        );
    }

    #[test]
    fn same_seeds_same_map() {
        let a = MapBuilder::new().map_size(2, 2).field_size(10, 10).build();
        let b = MapBuilder::new().map_size(2, 2).field_size(10, 10).build();
        assert_eq!(a, b);
    }
}
