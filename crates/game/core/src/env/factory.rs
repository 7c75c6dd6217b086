//! Entity templates and the factory interface that produces them.
//!
//! Factories decide what a player or an enemy of a given category and level
//! looks like (name, glyph, stats, experience yield). The engine decides where
//! it stands and what id it gets.

use crate::state::EnemyCategory;
use crate::stats::GameStats;

/// Everything about a new entity except its id and position.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityTemplate {
    pub name: String,
    pub symbol: char,
    pub stats: GameStats,
    /// Experience granted on death; zero for the player.
    pub experience_yield: u32,
}

impl EntityTemplate {
    pub fn new(name: impl Into<String>, symbol: char, stats: GameStats) -> Self {
        Self {
            name: name.into(),
            symbol,
            stats,
            experience_yield: 0,
        }
    }

    pub fn with_experience_yield(mut self, experience_yield: u32) -> Self {
        self.experience_yield = experience_yield;
        self
    }
}

/// Produces entity templates for one theme.
pub trait EntityFactory {
    fn create_player(&self) -> EntityTemplate;

    fn create_melee(&self, level: u32) -> EntityTemplate;

    fn create_ranged(&self, level: u32) -> EntityTemplate;

    fn create_elite(&self, level: u32) -> EntityTemplate;

    fn create_replicating(&self, level: u32) -> EntityTemplate;

    /// Dispatches to the per-category constructor.
    fn create_enemy(&self, category: EnemyCategory, level: u32) -> EntityTemplate {
        match category {
            EnemyCategory::Melee => self.create_melee(level),
            EnemyCategory::Ranged => self.create_ranged(level),
            EnemyCategory::Elite => self.create_elite(level),
            EnemyCategory::Replicating => self.create_replicating(level),
        }
    }
}

/// Level-independent factory with plain names.
///
/// Used by tests and as a fallback when no themed content is loaded.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedFactory;

impl FixedFactory {
    pub const PLAYER_HEALTH: u32 = 100;
    pub const PLAYER_ATTACK: u32 = 10;
    pub const PLAYER_DEFENSE: u32 = 5;
    pub const PLAYER_THRESHOLD: u32 = 20;
}

impl EntityFactory for FixedFactory {
    fn create_player(&self) -> EntityTemplate {
        let stats = GameStats::new(
            Self::PLAYER_HEALTH,
            Self::PLAYER_ATTACK,
            Self::PLAYER_DEFENSE,
        )
        .with_threshold(Self::PLAYER_THRESHOLD);
        EntityTemplate::new("Player", '@', stats)
    }

    fn create_melee(&self, level: u32) -> EntityTemplate {
        EntityTemplate::new("Brute", 'm', GameStats::new(30, 6, 1).with_level(level))
            .with_experience_yield(10)
    }

    fn create_ranged(&self, level: u32) -> EntityTemplate {
        EntityTemplate::new("Archer", 'r', GameStats::new(20, 8, 0).with_level(level))
            .with_experience_yield(15)
    }

    fn create_elite(&self, level: u32) -> EntityTemplate {
        EntityTemplate::new("Champion", 'E', GameStats::new(60, 12, 4).with_level(level))
            .with_experience_yield(20)
    }

    fn create_replicating(&self, level: u32) -> EntityTemplate {
        EntityTemplate::new("Spore", 's', GameStats::new(15, 3, 0).with_level(level))
            .with_experience_yield(5)
    }
}
