//! Procedural terrain: noise, per-field painting and map assembly.
mod builder;
mod field;
mod noise;

pub use builder::MapBuilder;
pub use field::{FieldGenerator, classify};
pub use noise::PerlinNoise;
