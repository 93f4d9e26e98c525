//! Simulation engine: the wave controller.
//!
//! `SimulationEngine` owns the player, the monster pool, the ability timers
//! and the wave counters, processes queued player commands, runs the systems
//! in a fixed order, and produces `GameStateSnapshot`s. It is headless and
//! deterministic for a given seed and command stream.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use wavedodge_core::commands::{InputFrame, MoveIntent, PlayerCommand};
use wavedodge_core::config::{ArenaConfig, DifficultyCurve};
use wavedodge_core::constants::CURRENCY_PER_DESPAWN;
use wavedodge_core::enums::{AbilityKind, GamePhase};
use wavedodge_core::events::GameEvent;
use wavedodge_core::loadout::AbilityLoadout;
use wavedodge_core::state::{EffectSnapshot, GameStateSnapshot};
use wavedodge_core::types::SimTime;

use crate::abilities::{AbilityEngine, ActivationOutcome};
use crate::entities::{MonsterPool, Player};
use crate::systems::{collision, movement, player, snapshot, spawner};
use crate::wave::WaveState;

/// Configuration for a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed. Same seed and same commands give the same simulation.
    pub seed: u64,
    pub arena: ArenaConfig,
    pub difficulty: DifficultyCurve,
    /// Initial ability parameters and unlocks.
    pub loadout: AbilityLoadout,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena: ArenaConfig::default(),
            difficulty: DifficultyCurve::default(),
            loadout: AbilityLoadout::default(),
        }
    }
}

/// The simulation engine. Owns all simulation state.
pub struct SimulationEngine {
    arena: ArenaConfig,
    curve: DifficultyCurve,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    player: Player,
    pool: MonsterPool,
    abilities: AbilityEngine,
    wave: WaveState,
    effects: EffectSnapshot,
    intent: MoveIntent,
    pending_activations: Vec<AbilityKind>,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            player: Player::spawn(&config.arena),
            pool: MonsterPool::new(config.arena.pool_capacity, config.arena.monster_size()),
            abilities: AbilityEngine::new(&config.loadout),
            wave: WaveState::new(&config.difficulty),
            arena: config.arena,
            curve: config.difficulty,
            time: SimTime::default(),
            phase: GamePhase::Playing,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            effects: EffectSnapshot::default(),
            intent: MoveIntent::default(),
            pending_activations: Vec::new(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Queue the commands for one frame of raw input.
    pub fn apply_input(&mut self, frame: &InputFrame) {
        self.queue_commands(frame.to_commands());
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    /// In GameOver nothing moves; only a queued restart has any effect, and
    /// the tick that restarts returns the fresh initial state.
    pub fn tick(&mut self) -> GameStateSnapshot {
        let was_playing = self.phase == GamePhase::Playing;
        self.process_commands();

        if was_playing && self.phase == GamePhase::Playing {
            self.run_systems();
            self.time.advance();
        } else {
            self.pending_activations.clear();
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Snapshot of the current state without advancing. Pending events stay
    /// queued for the next tick.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.build_snapshot(Vec::new())
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn pool(&self) -> &MonsterPool {
        &self.pool
    }

    pub fn abilities(&self) -> &AbilityEngine {
        &self.abilities
    }

    pub fn wave(&self) -> &WaveState {
        &self.wave
    }

    /// Effects computed during the most recent tick.
    pub fn effects(&self) -> EffectSnapshot {
        self.effects
    }

    pub fn arena(&self) -> &ArenaConfig {
        &self.arena
    }

    /// Put a monster into the first free slot as part of the current wave.
    #[cfg(test)]
    pub fn place_monster(&mut self, pos: glam::DVec2, vel: glam::DVec2) -> Option<usize> {
        let index = self.pool.first_free()?;
        let monster = self.pool.slot_mut(index)?;
        monster.active = true;
        monster.kind = wavedodge_core::enums::MonsterKind::Normal;
        monster.pos = pos;
        monster.vel = vel;
        self.wave.active_monsters += 1;
        self.wave.wave_spawned = true;
        Some(index)
    }

    #[cfg(test)]
    pub fn set_player_pos(&mut self, pos: glam::DVec2) {
        self.player.pos = pos;
    }

    fn build_snapshot(&self, events: Vec<GameEvent>) -> GameStateSnapshot {
        snapshot::build_snapshot(
            &self.time,
            self.phase,
            &self.player,
            &self.pool,
            self.abilities.view(),
            &self.wave,
            self.effects,
            events,
        )
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetMovement { intent } => {
                self.intent = intent;
            }
            PlayerCommand::Activate { ability } => {
                if self.phase == GamePhase::Playing {
                    self.pending_activations.push(ability);
                }
            }
            PlayerCommand::Restart => {
                if self.phase == GamePhase::GameOver {
                    self.restart();
                } else {
                    debug!(tick = self.time.tick, "restart ignored while playing");
                }
            }
            PlayerCommand::ApplyLoadout { loadout } => {
                self.abilities.apply_loadout(&loadout);
            }
        }
    }

    /// Reinitialize every piece of per-run state. The RNG stream continues.
    fn restart(&mut self) {
        self.player = Player::spawn(&self.arena);
        self.pool.reset();
        self.abilities.reset();
        self.wave.reset(&self.curve);
        self.effects = EffectSnapshot::default();
        self.pending_activations.clear();
        self.time = SimTime::default();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted);
        info!("run restarted");
    }

    /// One tick of play: input, abilities, spawn, move, collide, wave check.
    fn run_systems(&mut self) {
        player::run(&mut self.player, self.intent, &self.arena);

        for ability in std::mem::take(&mut self.pending_activations) {
            let outcome = self
                .abilities
                .activate(ability, self.intent, &mut self.player, &self.arena);
            self.events.push(match outcome {
                ActivationOutcome::Activated | ActivationOutcome::Dashed { .. } => {
                    GameEvent::AbilityActivated { ability }
                }
                ActivationOutcome::Rejected(reason) => {
                    GameEvent::ActivationRejected { ability, reason }
                }
            });
        }
        self.abilities.tick();
        self.effects = self.abilities.effects();

        if !self.wave.wave_spawned {
            let report = spawner::spawn_wave(
                &mut self.pool,
                &mut self.rng,
                &self.arena,
                &self.curve,
                self.wave.monsters_per_wave,
                self.wave.wave_number,
                self.player.center(),
                self.effects,
            );
            self.wave.active_monsters += report.spawned;
            self.wave.wave_spawned = true;
            self.events.push(GameEvent::WaveSpawned {
                wave_number: self.wave.wave_number,
                requested: report.requested,
                spawned: report.spawned,
            });
        }

        let moved = movement::run(&mut self.pool, &self.arena, self.effects);
        self.wave.active_monsters = self.wave.active_monsters.saturating_sub(moved.despawned);
        self.wave.monsters_avoided += moved.despawned;
        for kind in moved.kinds {
            self.events.push(GameEvent::MonsterAvoided { kind });
            self.events.push(GameEvent::CurrencyEarned {
                amount: CURRENCY_PER_DESPAWN,
            });
        }

        if collision::has_collision(&self.player.rect(), &self.pool, self.effects) {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                wave_number: self.wave.wave_number,
                monsters_avoided: self.wave.monsters_avoided,
            });
            info!(
                wave = self.wave.wave_number,
                avoided = self.wave.monsters_avoided,
                "game over"
            );
            return;
        }

        if self.wave.is_cleared() {
            let cleared = self.wave.wave_number;
            self.wave.advance(&self.curve);
            self.events.push(GameEvent::WaveCleared {
                wave_number: cleared,
            });
            self.events.push(GameEvent::WaveReached {
                wave_number: self.wave.wave_number,
            });
            info!(
                cleared,
                next_quota = self.wave.monsters_per_wave,
                "wave cleared"
            );
        }
    }
}
