//! Dungeon headless client binary.
//!
//! Composition root: merges configuration, installs logging, builds a
//! session and drives it with a command script and/or a random walk.
//!
//! # Examples
//!
//! ```bash
//! # Scripted session on the built-in content
//! cargo run -p dungeon-client -- --seed 7 --script "wwdd.c"
//!
//! # Forest theme, 200 random turns, print the final field
//! cargo run -p dungeon-client -- --theme forest --autoplay 200 --dump
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dungeon_client::{ClientConfig, Command, Driver, build_engine, logging};
use game_core::Theme;

/// Headless dungeon simulator
#[derive(Parser, Debug)]
#[command(name = "dungeon")]
#[command(about = "Runs a dungeon session without a UI", long_about = None)]
#[command(version)]
struct Args {
    /// Session seed (overrides GAME_SEED and the config file)
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Content theme: fantasy or forest
    #[arg(long, value_name = "THEME")]
    theme: Option<Theme>,

    /// TOML game configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Content directory (items.ron, themes/, maps/, config.toml)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Static map from `<data-dir>/maps/<NAME>.ron` instead of a generated one
    #[arg(long, value_name = "NAME")]
    map: Option<String>,

    /// Commands to run: w a s d move, c confuses, . waits
    #[arg(short, long, value_name = "COMMANDS")]
    script: Option<String>,

    /// Random-walk turns to play after the script
    #[arg(short, long, value_name = "TURNS")]
    autoplay: Option<u32>,

    /// Seed for the random walk (defaults to the session seed)
    #[arg(long, value_name = "SEED")]
    autoplay_seed: Option<u64>,

    /// Print the current field before the report
    #[arg(long)]
    dump: bool,

    /// Also write logs to a session file
    #[arg(long)]
    log_file: bool,

    /// Directory for session log files
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut ClientConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(theme) = self.theme {
            config.theme = Some(theme);
        }
        if let Some(path) = &self.config {
            config.config_path = Some(path.clone());
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = Some(dir.clone());
        }
        config.log_to_file |= self.log_file;
    }
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut client = ClientConfig::from_env();
    args.apply(&mut client);

    logging::setup_logging(&client)?;

    let script = match &args.script {
        Some(script) => Command::parse_script(script)?,
        None => Vec::new(),
    };

    let config = client.game_config()?;
    let seed = config.seed;
    let engine = build_engine(&client, config, args.map.as_deref())?;
    let mut driver = Driver::new(engine);

    driver.run_script(&script);
    if let Some(turns) = args.autoplay {
        driver.autoplay(turns, args.autoplay_seed.unwrap_or(seed));
    }

    if args.dump {
        println!("{}", driver.dump_field());
    }
    println!("{}", serde_json::to_string_pretty(&driver.report())?);

    Ok(())
}
