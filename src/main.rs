/// Entry point: load config, set up the terminal, play one round.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{GameConfig, LogConfig};
use error::GameError;
use sim::actors::Cadence;
use sim::driver;
use sim::event::GameEvent;
use sim::world::WorldState;
use ui::input::TerminalKeys;
use ui::renderer::{end_message, Screen};
use ui::sound::SoundEngine;

fn main() -> ExitCode {
    let config = GameConfig::load();

    if let Err(e) = init_logging(&config.log) {
        eprintln!("Logging disabled: {e}");
    }
    for warning in &config.warnings {
        warn!("config: {warning}");
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let world = WorldState::new(&mut rng);
    info!(seed = ?config.seed, golds = world.golds.len(), walls = world.walls.len(), "world generated");

    let mut screen = Screen::new(config.color, config.keys.hint());
    if let Err(e) = screen.init() {
        let _ = screen.cleanup();
        eprintln!("{}", GameError::Terminal(e));
        return ExitCode::FAILURE;
    }

    let sound = if config.sound { SoundEngine::new() } else { None };

    let result = driver::run(
        world,
        TerminalKeys::new(config.keys),
        &mut screen,
        &config.keys,
        Cadence::default(),
        |event| play_sound(sound.as_ref(), event),
    );

    if let Err(e) = screen.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    match result {
        Ok(finished) => {
            println!("{}", end_message(finished.status));
            println!();
            ExitCode::SUCCESS
        }
        Err(e) => {
            warn!("{e}");
            eprintln!("Game error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// File-only logging; the terminal belongs to the board while playing.
/// `RUST_LOG` overrides the configured level.
fn init_logging(log: &LogConfig) -> Result<(), GameError> {
    let Some(path) = &log.file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| GameError::LogFile { path: path.display().to_string(), source })?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| GameError::LogInit(e.to_string()))
}

fn play_sound(sound: Option<&SoundEngine>, event: &GameEvent) {
    let Some(sfx) = sound else { return };
    match event {
        GameEvent::GoldCollected { .. } => sfx.play_gold(),
        GameEvent::PlayerCrushed { .. } => sfx.play_crash(),
        GameEvent::AllGoldCollected => sfx.play_win(),
        GameEvent::Quit => {}
    }
}
