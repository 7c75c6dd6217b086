//! Turn engine.
//!
//! The [`GameEngine`] is the only writer of [`GameState`]. It owns the
//! behaviour tables of the current field's enemies, the external
//! collaborators ([`GameEnv`]) and the session RNG. Each player-facing call
//! validates first, mutates second and then advances the world by one turn.

mod actions;
mod combat;
mod errors;
mod population;
mod transition;
mod turns;

pub use errors::{
    AbilityError, AttackError, InventoryError, MoveError, MoveOutcome, TurnError,
};

use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::ai::{BehaviorTable, BehaviorView, MovementStrategy};
use crate::config::GameConfig;
use crate::env::rng::stream;
use crate::env::{EntityTemplate, GameEnv, GameRng, stream_rng};
use crate::error::SetupError;
use crate::state::{
    EnemyCategory, EnemyProfile, Entity, EntityId, EntityKind, GameMap, GameState,
    InventoryState, Item, ItemSlot, Position, Replicator,
};
use crate::stats::GameStats;
use crate::worldgen::MapBuilder;

/// Game engine that owns the session and applies every rule.
#[derive(Debug)]
pub struct GameEngine {
    state: GameState,
    behaviors: BehaviorTable,
    env: GameEnv,
    config: GameConfig,
    rng: GameRng,
    /// Number of fields populated so far; nonce for the population stream.
    field_visits: u64,
}

impl GameEngine {
    /// Starts a session on `map`: the player is placed on a random walkable
    /// cell of the central field, which is then populated.
    pub fn new(config: GameConfig, map: GameMap, env: GameEnv) -> Result<Self, SetupError> {
        let start_field = map.center();
        let field = map
            .field(start_field)
            .ok_or(SetupError::StartFieldOutOfMap(start_field))?;

        let cells = field.walkable_cells();
        let mut start_rng = stream_rng(config.seed, 0, EntityId::PLAYER.0, stream::START);
        let position = *cells
            .choose(&mut start_rng)
            .ok_or(SetupError::NoWalkableCell(start_field))?;

        let template = env.factory().create_player();
        let player = Entity {
            id: EntityId::PLAYER,
            kind: EntityKind::Player {
                inventory: InventoryState::empty(),
            },
            position,
            stats: template.stats,
            name: template.name,
            symbol: template.symbol,
        };

        let state = GameState::new(map, start_field, player, config.theme)?;
        let mut engine = Self::from_state(state, config, env);
        engine.populate_current_field();

        info!(
            seed = engine.config.seed,
            field = %start_field,
            position = %position,
            enemies = engine.state.entities.enemies.len(),
            "session started"
        );
        Ok(engine)
    }

    /// Generates a map from `config` and starts a session on it.
    pub fn generate(config: GameConfig, env: GameEnv) -> Result<Self, SetupError> {
        let map = MapBuilder::from_config(&config).build()?;
        Self::new(config, map, env)
    }

    /// Wraps an existing state without populating it.
    ///
    /// Enemies already present get a random basic strategy; enemies with
    /// replication budget join the replicating set.
    pub fn from_state(state: GameState, config: GameConfig, env: GameEnv) -> Self {
        let rng = stream_rng(config.seed, 0, 0, stream::ENGINE);
        let mut engine = Self {
            state,
            behaviors: BehaviorTable::new(),
            env,
            config,
            rng,
            field_visits: 0,
        };

        for index in 0..engine.state.entities.enemies.len() {
            let enemy = &engine.state.entities.enemies[index];
            let id = enemy.id;
            let replicating = enemy
                .enemy()
                .and_then(|profile| profile.replicator)
                .is_some_and(|replicator| !replicator.is_exhausted());
            let strategy = MovementStrategy::random(&mut engine.rng);
            engine.behaviors.insert(id, strategy);
            if replicating {
                engine.state.replicating.insert(id);
            }
        }
        engine
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn behaviors(&self) -> &BehaviorTable {
        &self.behaviors
    }

    /// Current strategy, state and original strategy of an enemy.
    pub fn behavior_of(&self, id: EntityId) -> Option<BehaviorView<'_>> {
        self.behaviors.view(id)
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// Adds an enemy to the current field.
    ///
    /// Replicating enemies receive the configured replicator and join the
    /// replicating set.
    pub fn spawn_enemy(
        &mut self,
        template: EntityTemplate,
        category: Option<EnemyCategory>,
        position: Position,
        strategy: MovementStrategy,
    ) -> Result<EntityId, SetupError> {
        if !self.state.field().is_walkable(position) {
            return Err(SetupError::NotWalkable(position));
        }

        let id = self.state.allocate_entity_id();
        let mut profile = EnemyProfile::new(template.experience_yield, category);
        if category == Some(EnemyCategory::Replicating) {
            let replication = &self.config.replication;
            profile = profile.with_replicator(Replicator::new(
                replication.chance,
                replication.budget,
            ));
            if replication.budget > 0 {
                self.state.replicating.insert(id);
            }
        }

        let enemy = Entity {
            id,
            kind: EntityKind::Enemy(profile),
            position,
            stats: template.stats,
            name: template.name,
            symbol: template.symbol,
        };

        debug!(
            id = %id,
            name = %enemy.name,
            position = %position,
            strategy = strategy.name(),
            "enemy spawned"
        );

        self.state.field_mut().set_occupant(position, Some(id));
        self.state.entities.enemies.push(enemy);
        self.behaviors.insert(id, strategy);
        Ok(id)
    }

    /// Drops an item on the ground of the current field.
    pub fn place_item(&mut self, item: Item, position: Position) -> Result<EntityId, SetupError> {
        if !self.state.field().is_walkable(position) {
            return Err(SetupError::NotWalkable(position));
        }

        let id = self.state.allocate_entity_id();
        let symbol = match item.slot {
            ItemSlot::Sword => '/',
            ItemSlot::Armor => '[',
            ItemSlot::Ring => '=',
        };
        let entity = Entity {
            id,
            name: item.name.clone(),
            kind: EntityKind::Item(item),
            position,
            stats: GameStats::default(),
            symbol,
        };

        self.state.field_mut().set_occupant(position, Some(id));
        self.state.entities.items.push(entity);
        Ok(id)
    }

    /// Plain-text dump of the current field with entity glyphs on top.
    pub fn render_field(&self) -> String {
        let field = self.state.field();
        field.render(|position| {
            let id = field.occupant_at(position)?;
            self.state.entities.get(id).map(|entity| entity.symbol)
        })
    }

    /// Moves an entity and keeps tile occupancy in step.
    fn relocate(&mut self, id: EntityId, to: Position) {
        let Some(entity) = self.state.entities.get_mut(id) else {
            return;
        };
        let from = entity.position;
        entity.position = to;

        let field = self.state.field_mut();
        field.set_occupant(from, None);
        field.set_occupant(to, Some(id));
    }

    /// Removes an enemy from the tile, the roster, the behaviour tables and
    /// the replicating set.
    fn remove_enemy(&mut self, id: EntityId) -> Option<Entity> {
        let enemy = self.state.entities.remove_enemy(id)?;
        self.state.field_mut().set_occupant(enemy.position, None);
        self.behaviors.remove(id);
        self.state.replicating.remove(&id);
        Some(enemy)
    }
}
