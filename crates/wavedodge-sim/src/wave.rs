//! Wave counters owned by the wave controller.

use wavedodge_core::config::DifficultyCurve;
use wavedodge_core::constants::INITIAL_WAVE;
use wavedodge_core::state::WaveView;

/// Per-run wave progression state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveState {
    /// Starts at 1.
    pub wave_number: u32,
    /// Quota for the current wave.
    pub monsters_per_wave: u32,
    /// Mirrors the number of active pool slots.
    pub active_monsters: u32,
    /// Despawned monsters this run.
    pub monsters_avoided: u32,
    /// Set once the current wave has been placed into the pool.
    pub wave_spawned: bool,
}

impl WaveState {
    pub fn new(curve: &DifficultyCurve) -> Self {
        Self {
            wave_number: INITIAL_WAVE,
            monsters_per_wave: curve.initial_quota,
            active_monsters: 0,
            monsters_avoided: 0,
            wave_spawned: false,
        }
    }

    pub fn reset(&mut self, curve: &DifficultyCurve) {
        *self = Self::new(curve);
    }

    /// A spawned wave whose monsters have all despawned.
    pub fn is_cleared(&self) -> bool {
        self.wave_spawned && self.active_monsters == 0
    }

    /// Move on to the next wave. The new wave spawns on the following tick.
    pub fn advance(&mut self, curve: &DifficultyCurve) {
        self.wave_number += 1;
        self.monsters_per_wave += curve.quota_step;
        self.wave_spawned = false;
    }

    pub fn view(&self) -> WaveView {
        WaveView {
            wave_number: self.wave_number,
            monsters_per_wave: self.monsters_per_wave,
            active_monsters: self.active_monsters,
            monsters_avoided: self.monsters_avoided,
            wave_spawned: self.wave_spawned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_wave_state_matches_initial_run() {
        let state = WaveState::new(&DifficultyCurve::default());
        assert_eq!(state.wave_number, 1);
        assert_eq!(state.monsters_per_wave, 5);
        assert_eq!(state.active_monsters, 0);
        assert_eq!(state.monsters_avoided, 0);
        assert!(!state.wave_spawned);
        assert!(!state.is_cleared());
    }

    #[test]
    fn test_advance_bumps_wave_and_quota_in_lockstep() {
        let curve = DifficultyCurve::default();
        let mut state = WaveState::new(&curve);
        state.wave_spawned = true;
        assert!(state.is_cleared());
        state.advance(&curve);
        assert_eq!(state.wave_number, 2);
        assert_eq!(state.monsters_per_wave, 6);
        assert!(!state.wave_spawned);
    }
}
