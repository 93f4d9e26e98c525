//! Monster integration and off-arena despawn.

use wavedodge_core::config::ArenaConfig;
use wavedodge_core::enums::MonsterKind;
use wavedodge_core::state::EffectSnapshot;

use crate::entities::MonsterPool;

/// Monsters that left the arena this tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementReport {
    pub despawned: u32,
    /// Kind of each despawned monster, in slot order.
    pub kinds: Vec<MonsterKind>,
}

/// Advance every active monster by its stored velocity scaled by the current
/// effect multiplier, then free any slot that ended up past the despawn bound.
///
/// Under slow the multiplier applies on top of any slow baked in at spawn.
pub fn run(pool: &mut MonsterPool, arena: &ArenaConfig, effects: EffectSnapshot) -> MovementReport {
    let multiplier = effects.monster_speed_multiplier();
    let mut report = MovementReport::default();

    for (_, monster) in pool.iter_active_mut() {
        monster.pos += monster.vel * multiplier;
        if arena.is_out_of_bounds(monster.pos) {
            report.despawned += 1;
            report.kinds.push(monster.kind);
            monster.deactivate();
        }
    }

    report
}
