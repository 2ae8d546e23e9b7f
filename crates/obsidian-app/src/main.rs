//! Obsidian Core headless runner.
//!
//! Plays a session with the scripted autopilot, either as fast as possible on
//! the main thread or in real time on the game loop thread.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use obsidian_app::autopilot::Autopilot;
use obsidian_app::game_loop::{self, TICK_DURATION};
use obsidian_app::state::{AppState, GameLoopCommand};
use obsidian_core::commands::{PlayerCommand, StartConfig};
use obsidian_core::constants::{STARTING_CREDITS, STARTING_WAVE};
use obsidian_core::state::SimSnapshot;
use obsidian_sim::{SimConfig, SimulationEngine};

#[derive(Parser, Debug)]
#[command(name = "obsidian")]
#[command(about = "Headless Obsidian Core tower-defense session")]
struct Args {
    /// RNG seed. Overrides the seed in --config.
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum ticks to run
    #[arg(long, default_value = "216000")]
    ticks: u64,

    /// JSON file with engine settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run on the game loop thread at the real tick rate
    #[arg(long)]
    realtime: bool,

    /// Wave to start from
    #[arg(long, default_value_t = STARTING_WAVE)]
    start_wave: u8,

    /// Starting credits
    #[arg(long, default_value_t = STARTING_CREDITS)]
    credits: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => serde_json::from_str::<SimConfig>(&std::fs::read_to_string(path)?)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let start = StartConfig {
        credits: args.credits,
        wave: args.start_wave,
        ..Default::default()
    };
    info!(?config, ?start, realtime = args.realtime, "starting run");

    let last = if args.realtime {
        run_realtime(config, start, args.ticks)
    } else {
        run_fast(config, start, args.ticks)
    };

    match last {
        Some(snap) => info!(
            phase = ?snap.phase,
            wave = snap.wave,
            tick = snap.time.tick,
            core = snap.core_health,
            credits = snap.credits,
            turrets = snap.live_unit_count,
            rank = %snap.rank.title,
            "run finished"
        ),
        None => info!("run finished before the first tick"),
    }
    Ok(())
}

/// Tick on this thread with no sleeping.
fn run_fast(config: SimConfig, start: StartConfig, ticks: u64) -> Option<SimSnapshot> {
    let mut engine = SimulationEngine::new(config);
    let mut pilot = Autopilot::new();
    engine.queue_command(PlayerCommand::Start { config: start });

    let mut last = None;
    for _ in 0..ticks {
        let snapshot = engine.tick();
        game_loop::log_events(&snapshot.events);
        if snapshot.phase.is_terminal() {
            return Some(snapshot);
        }
        if let Some(command) = pilot.decide(&snapshot) {
            engine.queue_command(command);
        }
        last = Some(snapshot);
    }
    last
}

/// Drive the game loop thread, polling its snapshots once per tick.
fn run_realtime(config: SimConfig, start: StartConfig, ticks: u64) -> Option<SimSnapshot> {
    let state = AppState::new();
    let tx = game_loop::spawn_game_loop(config, start, state.latest_snapshot.clone());
    if let Ok(mut slot) = state.command_tx.lock() {
        *slot = Some(tx);
    }
    if let Ok(mut running) = state.running.lock() {
        *running = true;
    }

    let mut pilot = Autopilot::new();
    let mut last_tick = None;
    loop {
        std::thread::sleep(TICK_DURATION);
        let Some(snapshot) = state.latest() else {
            continue;
        };
        if snapshot.phase.is_terminal() || snapshot.time.tick >= ticks {
            break;
        }
        // One decision per published tick.
        if last_tick == Some(snapshot.time.tick) {
            continue;
        }
        last_tick = Some(snapshot.time.tick);
        if let Some(command) = pilot.decide(&snapshot) {
            if !state.send(GameLoopCommand::PlayerCommand(command)) {
                break;
            }
        }
    }

    state.send(GameLoopCommand::Shutdown);
    if let Ok(mut running) = state.running.lock() {
        *running = false;
    }
    state.latest()
}
