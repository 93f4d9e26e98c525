//! Events emitted by the simulation for the economy, persistence and UI layers.
//!
//! The simulation only pushes events; it never waits on whoever consumes them.

use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Coins earned by the player (one per despawned monster).
    CurrencyEarned { amount: u32 },
    /// A monster left the arena without touching the player.
    MonsterAvoided { kind: MonsterKind },
    /// A wave's monsters were placed into the pool.
    WaveSpawned {
        wave_number: u32,
        requested: u32,
        spawned: u32,
    },
    /// Every monster of the wave has despawned.
    WaveCleared { wave_number: u32 },
    /// A new wave number was reached (best-score tracking).
    WaveReached { wave_number: u32 },
    AbilityActivated { ability: AbilityKind },
    ActivationRejected {
        ability: AbilityKind,
        reason: RejectReason,
    },
    /// Unshielded collision. Final numbers for stats, ranking and persistence.
    GameOver {
        wave_number: u32,
        monsters_avoided: u32,
    },
    /// A new run began after GameOver.
    Restarted,
}
