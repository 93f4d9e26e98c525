//! Game loop thread: runs the simulation engine at 60 Hz.
//!
//! The engine is created inside this thread so it never crosses threads.
//! Commands arrive via an `mpsc` channel, the latest snapshot is kept in
//! shared state for polling, and each tick's events are forwarded on a
//! second channel for the economy and persistence side.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::info;

use wavedodge_core::constants::TICK_RATE;
use wavedodge_core::events::GameEvent;
use wavedodge_core::state::GameStateSnapshot;
use wavedodge_sim::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Latest snapshot, shared between the loop thread and its readers.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// Running game loop thread.
pub struct GameLoopHandle {
    pub commands: mpsc::Sender<GameLoopCommand>,
    pub events: mpsc::Receiver<GameEvent>,
    pub latest_snapshot: SharedSnapshot,
    thread: JoinHandle<u64>,
}

impl GameLoopHandle {
    pub fn send(&self, command: GameLoopCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn latest(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|snapshot| snapshot.clone())
    }

    /// Stop the loop and wait for it. Returns the number of ticks run.
    pub fn shutdown(self) -> u64 {
        let _ = self.commands.send(GameLoopCommand::Shutdown);
        self.thread.join().unwrap_or(0)
    }
}

/// Spawn the game loop in a new thread.
pub fn spawn_game_loop(config: SimConfig) -> std::io::Result<GameLoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (event_tx, event_rx) = mpsc::channel::<GameEvent>();
    let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("wavedodge-game-loop".into())
        .spawn(move || run_game_loop(config, cmd_rx, event_tx, &shared))?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        events: event_rx,
        latest_snapshot,
        thread,
    })
}

/// The game loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    event_tx: mpsc::Sender<GameEvent>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> u64 {
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();
    let mut ticks = 0;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Input(frame)) => engine.apply_input(&frame),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(ticks, "game loop stopped");
                    return ticks;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick
        let mut snapshot = engine.tick();
        ticks += 1;

        // 3. Forward events; a vanished consumer does not stop the loop
        for event in std::mem::take(&mut snapshot.events) {
            let _ = event_tx.send(event);
        }

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}
