//! Upgrade formulas, costs and the level table.
//!
//! Levels count upgrades bought: 0 is the base ability, `MAX_UPGRADE_LEVEL`
//! the cap. Every parameter formula is monotonic in the level and clamps at
//! a floor or ceiling.

use serde::{Deserialize, Serialize};

use wavedodge_core::enums::AbilityKind;
use wavedodge_core::loadout::{AbilityLoadout, AbilityParams, AbilitySlot};

/// Highest upgrade level for any ability.
pub const MAX_UPGRADE_LEVEL: u32 = 19;

/// Price of unlocking an ability outright. `None` for abilities that start
/// unlocked.
pub fn unlock_cost(kind: AbilityKind) -> Option<u32> {
    match kind {
        AbilityKind::Dash => None,
        AbilityKind::Shield => Some(50),
        AbilityKind::Slow => Some(100),
        AbilityKind::Stop => Some(200),
    }
}

fn base_upgrade_cost(kind: AbilityKind) -> f64 {
    match kind {
        AbilityKind::Dash => 8.0,
        AbilityKind::Shield => 15.0,
        AbilityKind::Slow => 25.0,
        AbilityKind::Stop => 40.0,
    }
}

/// Cost of buying the next level from `current_level`.
/// Returns None if already at max level.
pub fn upgrade_cost(kind: AbilityKind, current_level: u32) -> Option<u32> {
    if current_level >= MAX_UPGRADE_LEVEL {
        return None;
    }
    // Curve is defined on 1-based levels.
    let n = f64::from(current_level + 1);
    let growth = 1.8_f64.powf(n - 1.0) + 0.5 * n * n + 2.0 * n;
    let steep = if n >= 10.0 { 1.3_f64.powf(n - 9.0) } else { 1.0 };
    let extreme = if n >= 15.0 { 1.5_f64.powf(n - 14.0) } else { 1.0 };
    Some((base_upgrade_cost(kind) * growth * steep * extreme).floor() as u32)
}

/// Ability parameters at an upgrade level. Levels past the cap are treated
/// as the cap.
pub fn params_for_level(kind: AbilityKind, level: u32) -> AbilityParams {
    let l = f64::from(level.min(MAX_UPGRADE_LEVEL));
    match kind {
        AbilityKind::Dash => AbilityParams {
            cooldown_secs: (3.0 - 0.13 * l).max(0.5),
            duration_secs: 0.0,
            magnitude: 100.0 + 9.5 * l,
        },
        AbilityKind::Shield => AbilityParams {
            cooldown_secs: (10.0 - 0.42 * l).max(2.0),
            duration_secs: 3.0 + 0.26 * l,
            magnitude: 0.0,
        },
        AbilityKind::Slow => AbilityParams {
            cooldown_secs: (15.0 - 0.63 * l).max(3.0),
            duration_secs: 5.0 + 0.37 * l,
            magnitude: (0.3 + 0.029 * l).min(0.85),
        },
        AbilityKind::Stop => AbilityParams {
            cooldown_secs: (60.0 - 2.63 * l).max(10.0),
            duration_secs: 3.0 + 0.37 * l,
            magnitude: 0.0,
        },
    }
}

/// Upgrade level per ability.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub dash: u32,
    pub shield: u32,
    pub slow: u32,
    pub stop: u32,
}

impl UpgradeLevels {
    pub fn level_for(&self, kind: AbilityKind) -> u32 {
        match kind {
            AbilityKind::Dash => self.dash,
            AbilityKind::Shield => self.shield,
            AbilityKind::Slow => self.slow,
            AbilityKind::Stop => self.stop,
        }
    }

    pub fn set_level(&mut self, kind: AbilityKind, level: u32) {
        match kind {
            AbilityKind::Dash => self.dash = level,
            AbilityKind::Shield => self.shield = level,
            AbilityKind::Slow => self.slow = level,
            AbilityKind::Stop => self.stop = level,
        }
    }
}

/// Build the simulation loadout from unlock flags and levels.
pub fn build_loadout(is_unlocked: impl Fn(AbilityKind) -> bool, levels: &UpgradeLevels) -> AbilityLoadout {
    let slot = |kind: AbilityKind| AbilitySlot {
        unlocked: is_unlocked(kind),
        params: params_for_level(kind, levels.level_for(kind)),
    };
    AbilityLoadout {
        dash: slot(AbilityKind::Dash),
        shield: slot(AbilityKind::Shield),
        slow: slot(AbilityKind::Slow),
        stop: slot(AbilityKind::Stop),
    }
}
