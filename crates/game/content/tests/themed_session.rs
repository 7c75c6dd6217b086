use game_content::{
    InventoryService, ItemCatalog, ItemDefinition, MapLoader, ThemeTable, ThemedFactory,
    builtin_env,
};
use game_core::{
    Direction, EnemyCategory, Entity, EntityId, EntityKind, FieldCoord, GameConfig, GameEngine,
    GameEnv, GameMap, GameState, GameStats, InventoryState, ItemSlot, MoveOutcome,
    MovementStrategy, Position, SpawnTable, Theme,
};

/// Single open field of `size x size` in the map file format.
fn open_map(size: usize) -> GameMap {
    let mut rows = Vec::with_capacity(size);
    for y in 0..size {
        let row: String = (0..size)
            .map(|x| {
                let corner = (x == 0 || x == size - 1) && (y == 0 || y == size - 1);
                let edge = x == 0 || x == size - 1 || y == 0 || y == size - 1;
                match (corner, edge) {
                    (true, _) => '#',
                    (false, true) => '+',
                    _ => '.',
                }
            })
            .collect();
        rows.push(format!("{row:?}"));
    }
    let text = format!("(width: 1, height: 1, fields: [[{}]])", rows.join(", "));
    MapLoader::parse(&text).expect("open map")
}

#[test]
fn themed_session_spawns_theme_archetypes() {
    let config = GameConfig::default().with_seed(5).with_theme(Theme::Forest);
    let env = builtin_env(config.theme, config.seed).expect("builtin content");
    let engine = GameEngine::new(config, open_map(14), env).expect("session");

    let table = ThemeTable::builtin(Theme::Forest).expect("builtin theme");
    let known: Vec<&str> = [&table.melee, &table.ranged, &table.elite, &table.replicating]
        .into_iter()
        .flat_map(|category| category.archetypes.iter().map(|a| a.name.as_str()))
        .collect();

    let state = engine.state();
    assert_eq!(state.player().name, "Ranger");
    assert_eq!(state.entities.enemies.len(), SpawnTable::default().total() as usize);
    for enemy in &state.entities.enemies {
        assert!(known.contains(&enemy.name.as_str()), "{} is not a forest archetype", enemy.name);
    }

    let replicating: Vec<EntityId> = state
        .entities
        .enemies
        .iter()
        .filter(|e| e.enemy().and_then(|p| p.category) == Some(EnemyCategory::Replicating))
        .map(|e| e.id)
        .collect();
    assert_eq!(replicating.len(), 1);
    assert!(state.replicating.contains(&replicating[0]));
}

#[test]
fn kill_drops_loot_that_can_be_picked_up() {
    let catalog = ItemCatalog {
        items: vec![ItemDefinition {
            name: "Stick".into(),
            slot: ItemSlot::Sword,
            modifier: 3,
            drop_chance: 1.0,
            durability: 4,
        }],
    };
    let factory = ThemedFactory::builtin(Theme::Fantasy, 1).expect("builtin theme");
    let env = GameEnv::new(Box::new(factory), Box::new(InventoryService::new(catalog)));

    let mut config = GameConfig::default();
    config.spawns = SpawnTable {
        melee: 0,
        ranged: 0,
        elite: 0,
        replicating: 0,
        level: 1,
    };
    let player = Entity {
        id: EntityId::PLAYER,
        kind: EntityKind::Player {
            inventory: InventoryState::empty(),
        },
        position: Position::new(2, 2),
        stats: GameStats::new(100, 500, 0).with_threshold(100),
        name: "Hero".into(),
        symbol: '@',
    };
    let state =
        GameState::new(open_map(8), FieldCoord::new(0, 0), player, config.theme).expect("state");
    let mut engine = GameEngine::from_state(state, config, env);

    let rat = game_core::EntityTemplate::new("Rat", 'r', GameStats::new(5, 1, 0))
        .with_experience_yield(5);
    engine
        .spawn_enemy(rat, None, Position::new(3, 2), MovementStrategy::Hold)
        .expect("free cell");

    let outcome = engine.move_player(Direction::Right).expect("attack");
    assert!(matches!(outcome, MoveOutcome::Attacked { result, .. } if result.killed));

    let state = engine.state();
    assert_eq!(state.entities.items.len(), 1);
    assert_eq!(state.entities.items[0].position, Position::new(3, 2));
    assert_eq!(state.entities.items[0].name, "Stick");

    let outcome = engine.move_player(Direction::Right).expect("pickup");
    assert!(matches!(outcome, MoveOutcome::PickedUp { .. }));

    let player = engine.state().player();
    assert_eq!(player.stats.attack, 503);
    let inventory = player.inventory().expect("player inventory");
    assert_eq!(
        inventory.equipped(ItemSlot::Sword).map(|item| item.name.as_str()),
        Some("Stick")
    );
}
