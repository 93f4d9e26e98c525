//! Ability parameters supplied by the upgrade/economy layer.
//!
//! Values are in seconds and pixels; the simulation converts them to ticks
//! when a loadout is applied and caches the result until the next one.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::AbilityKind;

/// Numeric parameters for one ability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityParams {
    pub cooldown_secs: f64,
    /// Zero for instant abilities.
    pub duration_secs: f64,
    /// Dash distance (px) for dash, slow factor for slow, unused otherwise.
    pub magnitude: f64,
}

/// Unlock flag plus parameters for one ability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub unlocked: bool,
    pub params: AbilityParams,
}

/// Complete ability configuration pushed into the simulation on change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityLoadout {
    pub dash: AbilitySlot,
    pub shield: AbilitySlot,
    pub slow: AbilitySlot,
    pub stop: AbilitySlot,
}

impl AbilityParams {
    /// Level-0 parameters for an ability.
    pub fn base(kind: AbilityKind) -> Self {
        match kind {
            AbilityKind::Dash => Self {
                cooldown_secs: DASH_BASE_COOLDOWN_SECS,
                duration_secs: 0.0,
                magnitude: DASH_BASE_DISTANCE,
            },
            AbilityKind::Shield => Self {
                cooldown_secs: SHIELD_BASE_COOLDOWN_SECS,
                duration_secs: SHIELD_BASE_DURATION_SECS,
                magnitude: 0.0,
            },
            AbilityKind::Slow => Self {
                cooldown_secs: SLOW_BASE_COOLDOWN_SECS,
                duration_secs: SLOW_BASE_DURATION_SECS,
                magnitude: SLOW_BASE_FACTOR,
            },
            AbilityKind::Stop => Self {
                cooldown_secs: STOP_BASE_COOLDOWN_SECS,
                duration_secs: STOP_BASE_DURATION_SECS,
                magnitude: 0.0,
            },
        }
    }

    pub fn cooldown_ticks(&self) -> u32 {
        secs_to_ticks(self.cooldown_secs)
    }

    pub fn duration_ticks(&self) -> u32 {
        secs_to_ticks(self.duration_secs)
    }
}

impl Default for AbilityLoadout {
    /// Base parameters with only dash unlocked.
    fn default() -> Self {
        let slot = |kind: AbilityKind| AbilitySlot {
            unlocked: kind == AbilityKind::Dash,
            params: AbilityParams::base(kind),
        };
        Self {
            dash: slot(AbilityKind::Dash),
            shield: slot(AbilityKind::Shield),
            slow: slot(AbilityKind::Slow),
            stop: slot(AbilityKind::Stop),
        }
    }
}

impl AbilityLoadout {
    /// Base parameters with every ability unlocked.
    pub fn all_unlocked() -> Self {
        let mut loadout = Self::default();
        for kind in AbilityKind::ALL {
            loadout.slot_mut(kind).unlocked = true;
        }
        loadout
    }

    pub fn slot(&self, kind: AbilityKind) -> &AbilitySlot {
        match kind {
            AbilityKind::Dash => &self.dash,
            AbilityKind::Shield => &self.shield,
            AbilityKind::Slow => &self.slow,
            AbilityKind::Stop => &self.stop,
        }
    }

    pub fn slot_mut(&mut self, kind: AbilityKind) -> &mut AbilitySlot {
        match kind {
            AbilityKind::Dash => &mut self.dash,
            AbilityKind::Shield => &mut self.shield,
            AbilityKind::Slow => &mut self.slow,
            AbilityKind::Stop => &mut self.stop,
        }
    }
}
