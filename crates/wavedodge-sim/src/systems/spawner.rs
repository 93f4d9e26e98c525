//! Spawn director: wave composition and edge placement.
//!
//! A wave is placed into the pool in a single tick. Monsters enter on a
//! random arena edge and head straight for where the player's center is at
//! spawn time; they never re-aim.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use wavedodge_core::config::{ArenaConfig, DifficultyCurve};
use wavedodge_core::enums::{ArenaEdge, MonsterKind};
use wavedodge_core::state::EffectSnapshot;

use crate::entities::MonsterPool;

/// Outcome of one wave spawn. `spawned < requested` means the pool ran out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub requested: u32,
    pub spawned: u32,
}

/// Monster kinds for a wave, faster kinds first. Lazy, so a huge quota
/// costs nothing beyond what the pool can take.
pub fn wave_composition(
    curve: &DifficultyCurve,
    quota: u32,
    wave_number: u32,
) -> impl Iterator<Item = MonsterKind> {
    let fast = curve.speed_type_count(quota, wave_number);
    (0..quota).map(move |i| {
        if i < fast {
            MonsterKind::Speed
        } else {
            MonsterKind::Normal
        }
    })
}

/// Spawn point on `edge`, uniform along the edge but kept `spawn_inset`
/// away from the corners.
pub fn spawn_point(rng: &mut ChaCha8Rng, arena: &ArenaConfig, edge: ArenaEdge) -> DVec2 {
    match edge {
        ArenaEdge::Top => DVec2::new(along(rng, arena.width, arena.spawn_inset), 0.0),
        ArenaEdge::Right => DVec2::new(arena.width, along(rng, arena.height, arena.spawn_inset)),
        ArenaEdge::Bottom => DVec2::new(along(rng, arena.width, arena.spawn_inset), arena.height),
        ArenaEdge::Left => DVec2::new(0.0, along(rng, arena.height, arena.spawn_inset)),
    }
}

fn along(rng: &mut ChaCha8Rng, length: f64, inset: f64) -> f64 {
    let (lo, hi) = (inset, length - inset);
    if lo < hi {
        rng.gen_range(lo..hi)
    } else {
        length / 2.0
    }
}

/// Velocity of magnitude `speed` from `from` toward `to`. Zero when the two
/// points coincide.
pub fn aim_velocity(from: DVec2, to: DVec2, speed: f64) -> DVec2 {
    (to - from).normalize_or_zero() * speed
}

/// Fill free pool slots with the current wave.
///
/// Each monster's speed is the wave's base speed times its kind multiplier,
/// times the slow factor when slow is active right now. That factor stays
/// in the stored velocity for the monster's whole life.
#[allow(clippy::too_many_arguments)]
pub fn spawn_wave(
    pool: &mut MonsterPool,
    rng: &mut ChaCha8Rng,
    arena: &ArenaConfig,
    curve: &DifficultyCurve,
    quota: u32,
    wave_number: u32,
    target: DVec2,
    effects: EffectSnapshot,
) -> SpawnReport {
    let base_speed = curve.base_speed_for_wave(wave_number);
    let slow = effects.slow_factor.unwrap_or(1.0);
    let mut report = SpawnReport {
        requested: quota,
        spawned: 0,
    };

    for kind in wave_composition(curve, quota, wave_number) {
        let Some(index) = pool.first_free() else {
            debug!(
                wave = wave_number,
                requested = quota,
                spawned = report.spawned,
                "monster pool exhausted"
            );
            break;
        };
        let edge = ArenaEdge::ALL[rng.gen_range(0..ArenaEdge::ALL.len())];
        let pos = spawn_point(rng, arena, edge);
        let Some(monster) = pool.slot_mut(index) else {
            break;
        };
        monster.active = true;
        monster.kind = kind;
        monster.pos = pos;
        monster.size = arena.monster_size();
        let speed = base_speed * curve.speed_multiplier(kind) * slow;
        monster.vel = aim_velocity(monster.center(), target, speed);
        report.spawned += 1;
    }

    report
}
