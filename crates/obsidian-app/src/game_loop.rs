//! Game loop thread: runs the simulation engine at `TICK_RATE` and publishes snapshots.
//!
//! The engine is created inside the thread so it never crosses a thread
//! boundary. Commands arrive via `mpsc`; the latest snapshot is stored in
//! shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use obsidian_core::commands::{PlayerCommand, StartConfig};
use obsidian_core::constants::TICK_RATE;
use obsidian_core::enums::Speaker;
use obsidian_core::events::SimEvent;
use obsidian_core::state::SimSnapshot;
use obsidian_sim::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread and starts a session with `start`.
///
/// Returns the command sender for the runner to use.
pub fn spawn_game_loop(
    config: SimConfig,
    start: StartConfig,
    latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
) -> mpsc::Sender<GameLoopCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("obsidian-game-loop".into())
        .spawn(move || {
            run_game_loop(config, start, cmd_rx, &latest_snapshot);
        })
        .expect("Failed to spawn game loop thread");

    cmd_tx
}

/// The game loop. Runs until Shutdown, channel disconnect or a terminal phase.
fn run_game_loop(
    config: SimConfig,
    start: StartConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SimSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::Start { config: start });
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    debug!("game loop shut down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    warn!("command channel disconnected, stopping game loop");
                    return;
                }
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick();
        log_events(&snapshot.events);
        let finished = snapshot.phase.is_terminal();

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if finished {
            info!(phase = ?engine.phase(), tick = engine.time().tick, "session over, game loop exiting");
            return;
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Log the events a presentation layer would react to.
pub fn log_events(events: &[SimEvent]) {
    for event in events {
        match event {
            SimEvent::NarrativeCue {
                wave,
                speaker,
                revealed,
            } => {
                let speaker = match speaker {
                    Speaker::Ally => "ally".to_string(),
                    Speaker::Hostile(kind) if *revealed => kind.as_str().to_string(),
                    Speaker::Hostile(_) => "unknown".to_string(),
                };
                info!(wave, %speaker, "transmission");
            }
            SimEvent::TurretDestroyed { turret_id, kind } => {
                info!(%turret_id, kind = kind.display_name(), "turret destroyed");
            }
            SimEvent::Victory { wave } => info!(wave, "the core holds"),
            SimEvent::Defeat { wave } => warn!(wave, "the core has fallen"),
            _ => {}
        }
    }
}
