//! Themed entity archetypes.
//!
//! A theme is a RON table of player and enemy archetypes. [`ThemedFactory`]
//! implements [`EntityFactory`] by picking one archetype of the requested
//! category and scaling it to the requested level.

use std::cell::RefCell;

use game_core::{EntityFactory, EntityTemplate, GameRng, GameStats, Theme};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const FANTASY: &str = include_str!("../data/fantasy.ron");
const FOREST: &str = include_str!("../data/forest.ron");

/// Per-level increase expressed as `numerator / denominator`, floored after
/// multiplying by the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratio(pub u32, pub u32);

impl Ratio {
    pub fn scale(self, level: u32) -> u32 {
        let Ratio(numerator, denominator) = self;
        if denominator == 0 {
            return 0;
        }
        level.saturating_mul(numerator) / denominator
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Growth {
    pub health: Ratio,
    pub attack: Ratio,
    pub defense: Ratio,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    pub name: String,
    pub symbol: char,
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
}

/// Archetypes of one enemy category with their shared scaling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTable {
    pub experience: u32,
    pub growth: Growth,
    pub archetypes: Vec<Archetype>,
}

impl CategoryTable {
    fn template(&self, archetype: &Archetype, level: u32) -> EntityTemplate {
        let health = archetype.health + self.growth.health.scale(level);
        let attack = archetype.attack + self.growth.attack.scale(level);
        let defense = archetype.defense + self.growth.defense.scale(level);
        let stats = GameStats::new(health, attack, defense).with_level(level);
        EntityTemplate::new(archetype.name.clone(), archetype.symbol, stats)
            .with_experience_yield(self.experience)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerArchetype {
    pub name: String,
    pub symbol: char,
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    /// Experience needed for the first level-up.
    pub threshold: u32,
}

/// Complete archetype table of a theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeTable {
    pub player: PlayerArchetype,
    pub melee: CategoryTable,
    pub ranged: CategoryTable,
    pub elite: CategoryTable,
    pub replicating: CategoryTable,
}

impl ThemeTable {
    /// Parses a table from RON text.
    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Table shipped with the crate for `theme`.
    pub fn builtin(theme: Theme) -> Result<Self, ron::error::SpannedError> {
        match theme {
            Theme::Fantasy => Self::from_ron(FANTASY),
            Theme::Forest => Self::from_ron(FOREST),
        }
    }

    fn categories(&self) -> [(&'static str, &CategoryTable); 4] {
        [
            ("melee", &self.melee),
            ("ranged", &self.ranged),
            ("elite", &self.elite),
            ("replicating", &self.replicating),
        ]
    }
}

/// Errors detected when a theme table is turned into a factory.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("invalid theme table: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("theme has no {0} archetypes")]
    EmptyCategory(&'static str),
}

/// [`EntityFactory`] backed by a [`ThemeTable`].
///
/// Archetypes within a category are picked by a seeded generator, so a
/// factory built from the same table and seed yields the same sequence.
#[derive(Debug)]
pub struct ThemedFactory {
    table: ThemeTable,
    rng: RefCell<GameRng>,
}

impl ThemedFactory {
    pub fn new(table: ThemeTable, seed: u64) -> Result<Self, ThemeError> {
        if let Some((name, _)) = table
            .categories()
            .into_iter()
            .find(|(_, category)| category.archetypes.is_empty())
        {
            return Err(ThemeError::EmptyCategory(name));
        }
        Ok(Self {
            table,
            rng: RefCell::new(GameRng::seed_from_u64(seed)),
        })
    }

    /// Factory for a built-in theme.
    pub fn builtin(theme: Theme, seed: u64) -> Result<Self, ThemeError> {
        Self::new(ThemeTable::builtin(theme)?, seed)
    }

    pub fn table(&self) -> &ThemeTable {
        &self.table
    }

    fn pick(&self, category: &CategoryTable, level: u32) -> EntityTemplate {
        let index = self.rng.borrow_mut().gen_range(0..category.archetypes.len());
        category.template(&category.archetypes[index], level)
    }
}

impl EntityFactory for ThemedFactory {
    fn create_player(&self) -> EntityTemplate {
        let player = &self.table.player;
        let stats = GameStats::new(player.health, player.attack, player.defense)
            .with_threshold(player.threshold);
        EntityTemplate::new(player.name.clone(), player.symbol, stats)
    }

    fn create_melee(&self, level: u32) -> EntityTemplate {
        self.pick(&self.table.melee, level)
    }

    fn create_ranged(&self, level: u32) -> EntityTemplate {
        self.pick(&self.table.ranged, level)
    }

    fn create_elite(&self, level: u32) -> EntityTemplate {
        self.pick(&self.table.elite, level)
    }

    fn create_replicating(&self, level: u32) -> EntityTemplate {
        self.pick(&self.table.replicating, level)
    }
}

#[cfg(test)]
mod tests {
    use game_core::EnemyCategory;

    use super::*;

    #[test]
    fn builtin_tables_parse() {
        for theme in [Theme::Fantasy, Theme::Forest] {
            let factory = ThemedFactory::builtin(theme, 1).expect("builtin theme");
            assert_eq!(factory.create_player().symbol, '@');
        }
    }

    #[test]
    fn ranged_scaling_floors_fractions() {
        let table = ThemeTable::builtin(Theme::Fantasy).expect("builtin theme");
        let archer = &table.ranged.archetypes[0];
        let template = table.ranged.template(archer, 3);
        // 15 + 3*4, 8 + floor(4.5), 1 + floor(3/3)
        assert_eq!(template.stats.max_health, 27);
        assert_eq!(template.stats.attack, 12);
        assert_eq!(template.stats.defense, 2);
        assert_eq!(template.stats.level, 3);
        assert_eq!(template.experience_yield, 15);
    }

    #[test]
    fn picks_come_from_the_category() {
        let factory = ThemedFactory::builtin(Theme::Forest, 42).expect("builtin theme");
        let names: Vec<String> = factory
            .table()
            .elite
            .archetypes
            .iter()
            .map(|archetype| archetype.name.clone())
            .collect();
        for _ in 0..20 {
            let elite = factory.create_enemy(EnemyCategory::Elite, 1);
            assert!(names.contains(&elite.name));
            assert_eq!(elite.experience_yield, 20);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let first = ThemedFactory::builtin(Theme::Fantasy, 9).expect("builtin theme");
        let second = ThemedFactory::builtin(Theme::Fantasy, 9).expect("builtin theme");
        for _ in 0..10 {
            assert_eq!(first.create_melee(2), second.create_melee(2));
        }
    }

    #[test]
    fn empty_category_is_rejected() {
        let mut table = ThemeTable::builtin(Theme::Fantasy).expect("builtin theme");
        table.elite.archetypes.clear();
        assert!(matches!(
            ThemedFactory::new(table, 0),
            Err(ThemeError::EmptyCategory("elite"))
        ));
    }

    #[test]
    fn player_has_progression_track() {
        let factory = ThemedFactory::builtin(Theme::Fantasy, 0).expect("builtin theme");
        let player = factory.create_player();
        assert_eq!(player.stats.experience_to_next_level, 20);
        assert_eq!(player.stats.health, 100);
    }
}
