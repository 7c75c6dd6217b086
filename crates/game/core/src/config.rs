//! Game configuration: compile-time capacities and runtime-tunable defaults.
//!
//! Every section implements `Default` so partial TOML documents (loaded by
//! `game-content`) only need to name the values they override.

/// Visual/content theme used by entity factories.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Fantasy,
    Forest,
}

/// Noise parameters shared by every field of a generated map.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TerrainConfig {
    pub height_seed: u64,
    pub biome_seed: u64,
    /// Multiplier applied to global tile coordinates before sampling.
    pub scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    /// Exponent applied to normalised height; values above 1 flatten lowlands.
    pub exponent: f64,
}

impl TerrainConfig {
    pub const DEFAULT_HEIGHT_SEED: u64 = 42;
    pub const DEFAULT_BIOME_SEED: u64 = 1337;
    pub const DEFAULT_SCALE: f64 = 0.2;
    pub const DEFAULT_OCTAVES: u32 = 10;
    pub const DEFAULT_PERSISTENCE: f64 = 0.2;
    pub const DEFAULT_EXPONENT: f64 = 1.4;
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            height_seed: Self::DEFAULT_HEIGHT_SEED,
            biome_seed: Self::DEFAULT_BIOME_SEED,
            scale: Self::DEFAULT_SCALE,
            octaves: Self::DEFAULT_OCTAVES,
            persistence: Self::DEFAULT_PERSISTENCE,
            exponent: Self::DEFAULT_EXPONENT,
        }
    }
}

/// Enemies spawned into every freshly entered field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnTable {
    pub melee: u32,
    pub ranged: u32,
    pub elite: u32,
    pub replicating: u32,
    /// Level handed to the factory for every spawned enemy.
    pub level: u32,
}

impl Default for SpawnTable {
    fn default() -> Self {
        Self {
            melee: 3,
            ranged: 2,
            elite: 1,
            replicating: 1,
            level: 1,
        }
    }
}

impl SpawnTable {
    pub fn total(&self) -> u32 {
        self.melee + self.ranged + self.elite + self.replicating
    }
}

/// Enemy decision tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    /// Health ratio at or below which an enemy panics.
    pub panic_threshold: f64,
    /// Health ratio at or above which a panicking enemy recovers.
    pub recovery_threshold: f64,
    pub tracking_give_up_distance: u32,
    pub patrol_radius: u32,
    pub patrol_duration: u32,
    /// Turns spent at each patrol point before moving on.
    pub patrol_dwell: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            panic_threshold: 0.3,
            recovery_threshold: 0.5,
            tracking_give_up_distance: 10,
            patrol_radius: 5,
            patrol_duration: 15,
            patrol_dwell: 3,
        }
    }
}

/// Self-replication tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReplicationConfig {
    pub chance: f64,
    pub budget: u32,
    /// Multiplier applied to the clone's replication chance.
    pub chance_decay: f64,
    /// Percentage of health and max health inherited by a clone.
    pub health_percent: u32,
    /// Percentage of attack and defense inherited by a clone.
    pub combat_percent: u32,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            chance: 0.2,
            budget: 10,
            chance_decay: 0.8,
            health_percent: 80,
            combat_percent: 90,
        }
    }
}

/// Area confusion ability tunables.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConfusionConfig {
    /// Chebyshev radius around the player.
    pub radius: u32,
    pub duration: u32,
    pub cooldown: u32,
}

impl Default for ConfusionConfig {
    fn default() -> Self {
        Self {
            radius: 3,
            duration: 5,
            cooldown: 10,
        }
    }
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Session seed driving population, AI randomness and replication.
    pub seed: u64,
    /// Number of fields per map row.
    pub map_width: u32,
    /// Number of field rows.
    pub map_height: u32,
    pub field_width: u32,
    pub field_height: u32,
    pub terrain: TerrainConfig,
    pub spawns: SpawnTable,
    pub ai: AiConfig,
    pub replication: ReplicationConfig,
    pub confusion: ConfusionConfig,
    /// Percentage of max health restored per turn (minimum 1 point).
    pub regeneration_percent: u32,
    pub theme: Theme,
    /// Player level that ends the session in victory.
    pub victory_level: Option<u32>,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_INVENTORY_SLOTS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SEED: u64 = 0x5eed;
    pub const DEFAULT_MAP_SIZE: u32 = 11;
    pub const DEFAULT_FIELD_SIZE: u32 = 30;
    pub const DEFAULT_REGENERATION_PERCENT: u32 = 1;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            map_width: Self::DEFAULT_MAP_SIZE,
            map_height: Self::DEFAULT_MAP_SIZE,
            field_width: Self::DEFAULT_FIELD_SIZE,
            field_height: Self::DEFAULT_FIELD_SIZE,
            terrain: TerrainConfig::default(),
            spawns: SpawnTable::default(),
            ai: AiConfig::default(),
            replication: ReplicationConfig::default(),
            confusion: ConfusionConfig::default(),
            regeneration_percent: Self::DEFAULT_REGENERATION_PERCENT,
            theme: Theme::default(),
            victory_level: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_parses_case_insensitively() {
        assert_eq!("Forest".parse::<Theme>(), Ok(Theme::Forest));
        assert_eq!("fantasy".parse::<Theme>(), Ok(Theme::Fantasy));
        assert!("desert".parse::<Theme>().is_err());
    }

    #[test]
    fn default_spawn_table_totals_seven() {
        assert_eq!(SpawnTable::default().total(), 7);
    }
}
