//! Arena geometry and difficulty curve.
//!
//! Both are plain data with `Default` impls built from `constants`, so a
//! difficulty curve can be swapped by deserializing a different one.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::MonsterKind;

/// Arena and entity geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
    /// Distance kept from the corners when choosing a spawn point on an edge.
    pub spawn_inset: f64,
    /// How far past an edge a monster may travel before it despawns.
    pub despawn_margin: f64,
    pub player_width: f64,
    pub player_height: f64,
    pub player_speed: f64,
    pub player_spawn: DVec2,
    pub monster_width: f64,
    pub monster_height: f64,
    pub pool_capacity: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            spawn_inset: SPAWN_EDGE_INSET,
            despawn_margin: DESPAWN_MARGIN,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_spawn: DVec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            monster_width: MONSTER_WIDTH,
            monster_height: MONSTER_HEIGHT,
            pool_capacity: MONSTER_POOL_CAPACITY,
        }
    }
}

impl ArenaConfig {
    pub fn player_size(&self) -> DVec2 {
        DVec2::new(self.player_width, self.player_height)
    }

    pub fn monster_size(&self) -> DVec2 {
        DVec2::new(self.monster_width, self.monster_height)
    }

    /// Highest top-left position that keeps the player inside the arena.
    pub fn player_max(&self) -> DVec2 {
        DVec2::new(
            self.width - self.player_width,
            self.height - self.player_height,
        )
    }

    /// True once a monster position lies beyond the despawn margin on any side.
    pub fn is_out_of_bounds(&self, pos: DVec2) -> bool {
        pos.x < -self.despawn_margin
            || pos.x > self.width + self.despawn_margin
            || pos.y < -self.despawn_margin
            || pos.y > self.height + self.despawn_margin
    }
}

/// Wave sizing and monster speed curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyCurve {
    pub initial_quota: u32,
    pub quota_step: u32,
    /// Monster speed (px/tick) in wave 1.
    pub base_speed: f64,
    pub speed_per_wave: f64,
    /// First wave that contains faster monsters.
    pub speed_type_unlock_wave: u32,
    pub speed_type_multiplier: f64,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            initial_quota: INITIAL_QUOTA,
            quota_step: QUOTA_STEP,
            base_speed: BASE_MONSTER_SPEED,
            speed_per_wave: SPEED_PER_WAVE,
            speed_type_unlock_wave: SPEED_TYPE_UNLOCK_WAVE,
            speed_type_multiplier: SPEED_TYPE_MULTIPLIER,
        }
    }
}

impl DifficultyCurve {
    /// Base monster speed for a wave: `base + (wave - 1) * step`.
    pub fn base_speed_for_wave(&self, wave_number: u32) -> f64 {
        self.base_speed + wave_number.saturating_sub(1) as f64 * self.speed_per_wave
    }

    /// Number of faster monsters in a wave: one per wave at or past the
    /// unlock wave, capped at the quota.
    pub fn speed_type_count(&self, quota: u32, wave_number: u32) -> u32 {
        let past = (wave_number + 1).saturating_sub(self.speed_type_unlock_wave);
        past.min(quota)
    }

    pub fn speed_multiplier(&self, kind: MonsterKind) -> f64 {
        match kind {
            MonsterKind::Normal => 1.0,
            MonsterKind::Speed => self.speed_type_multiplier,
        }
    }
}
