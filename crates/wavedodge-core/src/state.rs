//! Game state snapshot: the complete read-only view handed to renderers and
//! collaborators after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Rect, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: Rect,
    pub monsters: Vec<MonsterView>,
    pub abilities: AbilitiesView,
    pub wave: WaveView,
    pub effects: EffectSnapshot,
    /// Events raised since the previous snapshot.
    pub events: Vec<GameEvent>,
}

/// One active monster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterView {
    /// Pool slot index. Not a stable identity across despawns.
    pub slot: usize,
    pub rect: Rect,
    pub kind: MonsterKind,
    pub color: String,
}

/// HUD state for one ability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityView {
    pub unlocked: bool,
    pub active: bool,
    pub cooldown_remaining: u32,
    pub cooldown_max: u32,
    pub duration_remaining: u32,
    pub duration_max: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilitiesView {
    pub dash: AbilityView,
    pub shield: AbilityView,
    pub slow: AbilityView,
    pub stop: AbilityView,
}

/// Wave counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveView {
    pub wave_number: u32,
    pub monsters_per_wave: u32,
    pub active_monsters: u32,
    pub monsters_avoided: u32,
    pub wave_spawned: bool,
}

/// Ability effects in force for the current tick, computed once and passed
/// by value into the spawn, movement and collision systems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectSnapshot {
    /// Collision immunity.
    pub shielded: bool,
    /// Slow factor while slow is active.
    pub slow_factor: Option<f64>,
    /// Full override: monsters do not move at all.
    pub stopped: bool,
}

impl EffectSnapshot {
    /// Multiplier applied to monster velocity each tick: 0 under stop,
    /// the slow factor under slow, otherwise 1.
    pub fn monster_speed_multiplier(&self) -> f64 {
        if self.stopped {
            0.0
        } else {
            self.slow_factor.unwrap_or(1.0)
        }
    }

    pub fn is_shielded(&self) -> bool {
        self.shielded
    }
}

impl AbilitiesView {
    pub fn get(&self, kind: AbilityKind) -> &AbilityView {
        match kind {
            AbilityKind::Dash => &self.dash,
            AbilityKind::Shield => &self.shield,
            AbilityKind::Slow => &self.slow,
            AbilityKind::Stop => &self.stop,
        }
    }
}
