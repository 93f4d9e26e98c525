//! Ability engine: cooldown/duration timers and the effects they produce.
//!
//! Timers count ticks, not wall-clock time, so pausing is simply not ticking.
//! Parameters come from an `AbilityLoadout` and are only recomputed when a new
//! loadout is applied.

use glam::DVec2;
use tracing::debug;

use wavedodge_core::commands::MoveIntent;
use wavedodge_core::config::ArenaConfig;
use wavedodge_core::constants::DASH_DIAGONAL_FACTOR;
use wavedodge_core::enums::{AbilityKind, RejectReason};
use wavedodge_core::loadout::{AbilityLoadout, AbilitySlot};
use wavedodge_core::state::{AbilitiesView, AbilityView, EffectSnapshot};

use crate::entities::Player;

/// Timer state for one ability.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AbilityState {
    pub unlocked: bool,
    pub cooldown_remaining: u32,
    pub cooldown_max: u32,
    /// Only ever true for duration abilities with `duration_remaining > 0`.
    pub active: bool,
    pub duration_remaining: u32,
    pub duration_max: u32,
    /// Dash distance or slow factor.
    pub magnitude: f64,
}

/// Result of an activation attempt. Refusals are values, never errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivationOutcome {
    /// A duration ability is now active.
    Activated,
    /// The player was displaced by a dash.
    Dashed { from: DVec2, to: DVec2 },
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Default)]
pub struct AbilityEngine {
    dash: AbilityState,
    shield: AbilityState,
    slow: AbilityState,
    stop: AbilityState,
}

impl AbilityState {
    fn configure(&mut self, slot: &AbilitySlot) {
        self.unlocked = slot.unlocked;
        self.cooldown_max = slot.params.cooldown_ticks();
        self.duration_max = slot.params.duration_ticks();
        self.magnitude = slot.params.magnitude;
    }

    fn tick(&mut self) {
        if self.cooldown_remaining > 0 {
            self.cooldown_remaining -= 1;
        }
        if self.duration_remaining > 0 {
            self.duration_remaining -= 1;
            if self.duration_remaining == 0 {
                self.active = false;
            }
        }
    }

    fn clear_timers(&mut self) {
        self.cooldown_remaining = 0;
        self.duration_remaining = 0;
        self.active = false;
    }

    fn view(&self) -> AbilityView {
        AbilityView {
            unlocked: self.unlocked,
            active: self.active,
            cooldown_remaining: self.cooldown_remaining,
            cooldown_max: self.cooldown_max,
            duration_remaining: self.duration_remaining,
            duration_max: self.duration_max,
        }
    }
}

impl AbilityEngine {
    pub fn new(loadout: &AbilityLoadout) -> Self {
        let mut engine = Self::default();
        engine.apply_loadout(loadout);
        engine
    }

    /// Recompute maxima and magnitudes from a new loadout. Running timers keep
    /// their remaining counts.
    pub fn apply_loadout(&mut self, loadout: &AbilityLoadout) {
        for kind in AbilityKind::ALL {
            self.state_mut(kind).configure(loadout.slot(kind));
        }
    }

    pub fn state(&self, kind: AbilityKind) -> &AbilityState {
        match kind {
            AbilityKind::Dash => &self.dash,
            AbilityKind::Shield => &self.shield,
            AbilityKind::Slow => &self.slow,
            AbilityKind::Stop => &self.stop,
        }
    }

    fn state_mut(&mut self, kind: AbilityKind) -> &mut AbilityState {
        match kind {
            AbilityKind::Dash => &mut self.dash,
            AbilityKind::Shield => &mut self.shield,
            AbilityKind::Slow => &mut self.slow,
            AbilityKind::Stop => &mut self.stop,
        }
    }

    /// Decrement every running cooldown and duration by one tick.
    pub fn tick(&mut self) {
        for kind in AbilityKind::ALL {
            self.state_mut(kind).tick();
        }
    }

    /// Try to fire an ability. Dash moves `player` immediately; the others
    /// start their duration timer.
    pub fn activate(
        &mut self,
        kind: AbilityKind,
        intent: MoveIntent,
        player: &mut Player,
        arena: &ArenaConfig,
    ) -> ActivationOutcome {
        let state = self.state_mut(kind);
        if !state.unlocked {
            debug!(ability = kind.as_str(), "activation refused: locked");
            return ActivationOutcome::Rejected(RejectReason::Locked);
        }
        if state.cooldown_remaining > 0 {
            debug!(
                ability = kind.as_str(),
                remaining = state.cooldown_remaining,
                "activation refused: on cooldown"
            );
            return ActivationOutcome::Rejected(RejectReason::OnCooldown);
        }

        state.cooldown_remaining = state.cooldown_max;

        if kind.is_instant() {
            let from = player.pos;
            player.pos += dash_displacement(intent, state.magnitude);
            player.clamp_to(arena);
            return ActivationOutcome::Dashed {
                from,
                to: player.pos,
            };
        }

        state.duration_remaining = state.duration_max;
        state.active = state.duration_max > 0;
        ActivationOutcome::Activated
    }

    /// Effects in force right now. Computed once per tick by the engine.
    pub fn effects(&self) -> EffectSnapshot {
        EffectSnapshot {
            shielded: self.shield.active,
            slow_factor: self.slow.active.then_some(self.slow.magnitude),
            stopped: self.stop.active,
        }
    }

    pub fn is_shielded(&self) -> bool {
        self.shield.active
    }

    pub fn monster_speed_multiplier(&self) -> f64 {
        self.effects().monster_speed_multiplier()
    }

    /// Zero every cooldown and duration and clear active flags. Parameters
    /// from the current loadout are kept.
    pub fn reset(&mut self) {
        for kind in AbilityKind::ALL {
            self.state_mut(kind).clear_timers();
        }
    }

    pub fn view(&self) -> AbilitiesView {
        AbilitiesView {
            dash: self.dash.view(),
            shield: self.shield.view(),
            slow: self.slow.view(),
            stop: self.stop.view(),
        }
    }
}

/// Dash offset for the held directions. Right wins over left and down over up
/// when both are held. A diagonal scales each axis by 0.707; no direction
/// dashes to the right.
pub fn dash_displacement(intent: MoveIntent, distance: f64) -> DVec2 {
    let mut dir = DVec2::ZERO;
    if intent.left {
        dir.x = -1.0;
    }
    if intent.right {
        dir.x = 1.0;
    }
    if intent.up {
        dir.y = -1.0;
    }
    if intent.down {
        dir.y = 1.0;
    }

    if dir.x != 0.0 && dir.y != 0.0 {
        dir *= DASH_DIAGONAL_FACTOR;
    }
    if dir == DVec2::ZERO {
        dir.x = 1.0;
    }
    dir * distance
}
