//! Headless session driver.
//!
//! Feeds commands to a [`GameEngine`], either from a script string or from a
//! seeded random walk, and summarises the session as a [`SessionReport`].

use game_core::{
    Direction, FieldCoord, GameEngine, GameError, GameRng, GameStats, MoveOutcome, Position,
    Theme,
};
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

/// One player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Area confusion ability.
    Confuse,
    Wait,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("unknown command '{command}' at offset {offset}")]
    UnknownCommand { command: char, offset: usize },
}

impl Command {
    /// `w a s d` move, `c` confuses, `.` waits. Whitespace is ignored.
    pub fn from_char(command: char) -> Option<Self> {
        match command {
            'w' => Some(Command::Move(Direction::Up)),
            'a' => Some(Command::Move(Direction::Left)),
            's' => Some(Command::Move(Direction::Down)),
            'd' => Some(Command::Move(Direction::Right)),
            'c' => Some(Command::Confuse),
            '.' => Some(Command::Wait),
            _ => None,
        }
    }

    pub fn parse_script(script: &str) -> Result<Vec<Command>, ScriptError> {
        script
            .char_indices()
            .filter(|(_, command)| !command.is_whitespace())
            .map(|(offset, command)| {
                Command::from_char(command).ok_or(ScriptError::UnknownCommand { command, offset })
            })
            .collect()
    }
}

/// Tally of what the driver's commands did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ActionCounts {
    pub moves: u32,
    pub attacks: u32,
    pub pickups: u32,
    pub transitions: u32,
    pub confusions: u32,
    pub waits: u32,
    /// Commands the engine refused; they did not advance the turn.
    pub rejected: u32,
}

/// End-of-session summary printed as JSON.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionReport {
    pub seed: u64,
    pub theme: Theme,
    pub turns: u64,
    pub field: FieldCoord,
    pub position: Position,
    pub player: GameStats,
    pub enemies: usize,
    pub replicating: usize,
    pub victory: bool,
    pub game_over: bool,
    pub actions: ActionCounts,
}

pub struct Driver {
    engine: GameEngine,
    counts: ActionCounts,
}

impl Driver {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            counts: ActionCounts::default(),
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn counts(&self) -> ActionCounts {
        self.counts
    }

    /// Applies one command. Returns `false` when the engine rejected it.
    pub fn execute(&mut self, command: Command) -> bool {
        let result = match command {
            Command::Move(direction) => self
                .engine
                .move_player(direction)
                .map(|outcome| self.record_move(outcome))
                .map_err(|error| error.error_code()),
            Command::Confuse => self
                .engine
                .use_confusion_ability()
                .map(|targets| {
                    debug!(targets = targets.len(), "confused enemies");
                    self.counts.confusions += 1;
                })
                .map_err(|error| error.error_code()),
            Command::Wait => self
                .engine
                .wait()
                .map(|()| self.counts.waits += 1)
                .map_err(|error| error.error_code()),
        };

        match result {
            Ok(()) => true,
            Err(code) => {
                debug!(?command, code, "command rejected");
                self.counts.rejected += 1;
                false
            }
        }
    }

    /// Runs `commands` in order, stopping early when the session ends.
    pub fn run_script(&mut self, commands: &[Command]) {
        for &command in commands {
            if self.engine.is_game_over() {
                break;
            }
            self.execute(command);
        }
    }

    /// Random walk for up to `turns` turns.
    ///
    /// Each step tries the confusion ability one time in eight and otherwise
    /// a random direction; a refused command falls back to waiting, so every
    /// step advances the turn.
    pub fn autoplay(&mut self, turns: u32, seed: u64) {
        let mut rng = GameRng::seed_from_u64(seed);
        for _ in 0..turns {
            if self.engine.is_game_over() {
                break;
            }
            let command = if rng.gen_range(0..8) == 0 {
                Command::Confuse
            } else {
                Command::Move(Direction::ALL[rng.gen_range(0..Direction::ALL.len())])
            };
            if !self.execute(command) {
                self.execute(Command::Wait);
            }
        }
        info!(turn = self.engine.state().turn, "autoplay finished");
    }

    /// Plain-text view of the current field.
    pub fn dump_field(&self) -> String {
        self.engine.render_field()
    }

    pub fn report(&self) -> SessionReport {
        let state = self.engine.state();
        let player = state.player();
        SessionReport {
            seed: self.engine.config().seed,
            theme: state.theme,
            turns: state.turn,
            field: state.current_field,
            position: player.position,
            player: player.stats,
            enemies: state.entities.enemies.len(),
            replicating: state.replicating.len(),
            victory: state.victory,
            game_over: state.game_over,
            actions: self.counts,
        }
    }

    fn record_move(&mut self, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Moved { .. } => self.counts.moves += 1,
            MoveOutcome::Attacked { .. } => self.counts.attacks += 1,
            MoveOutcome::PickedUp { .. } => self.counts.pickups += 1,
            MoveOutcome::Transitioned { field, to } => {
                debug!(field = %field, position = %to, "changed field");
                self.counts.transitions += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use game_content::builtin_env;
    use game_core::GameConfig;

    use super::*;

    fn small_config(seed: u64) -> GameConfig {
        let mut config = GameConfig::default().with_seed(seed);
        config.map_width = 3;
        config.map_height = 3;
        config.field_width = 14;
        config.field_height = 12;
        config
    }

    fn driver(seed: u64) -> Driver {
        let config = small_config(seed);
        let env = builtin_env(config.theme, config.seed).unwrap();
        Driver::new(GameEngine::generate(config, env).unwrap())
    }

    #[test]
    fn parses_scripts() {
        let commands = Command::parse_script("wd s\n.c a").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Move(Direction::Up),
                Command::Move(Direction::Right),
                Command::Move(Direction::Down),
                Command::Wait,
                Command::Confuse,
                Command::Move(Direction::Left),
            ]
        );
    }

    #[test]
    fn rejects_unknown_commands() {
        assert_eq!(
            Command::parse_script("ww?"),
            Err(ScriptError::UnknownCommand {
                command: '?',
                offset: 2
            })
        );
    }

    #[test]
    fn waiting_advances_turns() {
        let mut driver = driver(3);
        driver.run_script(&[Command::Wait, Command::Wait, Command::Wait]);
        let report = driver.report();
        if !report.game_over {
            assert_eq!(report.turns, 3);
            assert_eq!(report.actions.waits, 3);
        }
    }

    #[test]
    fn autoplay_spends_one_turn_per_step() {
        let mut driver = driver(11);
        driver.autoplay(40, 5);
        let report = driver.report();
        assert!(report.turns == 40 || report.game_over);
        assert!(report.turns <= 40);
    }

    #[test]
    fn same_seeds_same_report() {
        let mut first = driver(21);
        let mut second = driver(21);
        first.autoplay(30, 8);
        second.autoplay(30, 8);
        assert_eq!(first.report(), second.report());
        assert_eq!(first.dump_field(), second.dump_field());
    }

    #[test]
    fn report_serializes_to_json() {
        let driver = driver(1);
        let json = serde_json::to_value(driver.report()).unwrap();
        assert_eq!(json["turns"], 0);
        assert_eq!(json["theme"], "fantasy");
        assert_eq!(json["player"]["level"], 1);
        assert!(json["actions"]["rejected"].is_number());
    }
}
