#![allow(dead_code)]

use game_core::{
    Entity, EntityId, EntityKind, EntityTemplate, FieldCoord, GameConfig, GameEngine, GameEnv,
    GameField, GameMap, GameState, GameStats, InventoryState, Position, SpawnTable, TileKind,
};

/// Field with the standard border and `interior` deciding every inner cell.
pub fn field_with(
    coord: FieldCoord,
    width: u32,
    height: u32,
    interior: impl Fn(Position) -> TileKind,
) -> GameField {
    let right = width as i32 - 1;
    let bottom = height as i32 - 1;
    let mut kinds = Vec::with_capacity((width * height) as usize);
    for y in 0..=bottom {
        for x in 0..=right {
            let vertical_edge = x == 0 || x == right;
            let horizontal_edge = y == 0 || y == bottom;
            kinds.push(match (vertical_edge, horizontal_edge) {
                (true, true) => TileKind::Wall,
                (false, true) if y == 0 => TileKind::ExitUp,
                (false, true) => TileKind::ExitDown,
                (true, false) if x == 0 => TileKind::ExitLeft,
                (true, false) => TileKind::ExitRight,
                (false, false) => interior(Position::new(x, y)),
            });
        }
    }
    GameField::from_kinds(coord, width, height, kinds)
}

/// Map of identical open fields.
pub fn open_map(map_width: u32, map_height: u32, field_size: u32) -> GameMap {
    let fields = (0..map_height as i32)
        .flat_map(|y| (0..map_width as i32).map(move |x| FieldCoord::new(x, y)))
        .map(|coord| field_with(coord, field_size, field_size, |_| TileKind::Field))
        .collect();
    GameMap::new(map_width, map_height, fields).expect("open map is valid")
}

/// Config that never spawns enemies on its own.
pub fn quiet_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.spawns = SpawnTable {
        melee: 0,
        ranged: 0,
        elite: 0,
        replicating: 0,
        level: 1,
    };
    config
}

/// Engine on `map` with the player at `position` of `field`.
pub fn engine_at(
    map: GameMap,
    field: FieldCoord,
    position: Position,
    stats: GameStats,
    config: GameConfig,
) -> GameEngine {
    let player = Entity {
        id: EntityId::PLAYER,
        kind: EntityKind::Player {
            inventory: InventoryState::empty(),
        },
        position,
        stats,
        name: "Hero".into(),
        symbol: '@',
    };
    let state = GameState::new(map, field, player, config.theme).expect("valid start");
    GameEngine::from_state(state, config, GameEnv::default())
}

pub fn template(name: &str, stats: GameStats, experience_yield: u32) -> EntityTemplate {
    EntityTemplate::new(name, 'm', stats).with_experience_yield(experience_yield)
}
