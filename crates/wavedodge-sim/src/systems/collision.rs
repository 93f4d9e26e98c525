//! Player/monster collision test.

use wavedodge_core::state::EffectSnapshot;
use wavedodge_core::types::Rect;

use crate::entities::MonsterPool;

/// Slot index of the first active monster overlapping the player, ignoring
/// the shield.
pub fn first_overlap(player: &Rect, pool: &MonsterPool) -> Option<usize> {
    pool.iter_active()
        .find(|(_, monster)| player.overlaps(&monster.rect()))
        .map(|(slot, _)| slot)
}

/// True when an unshielded player overlaps any active monster.
pub fn has_collision(player: &Rect, pool: &MonsterPool, effects: EffectSnapshot) -> bool {
    if effects.is_shielded() {
        return false;
    }
    first_overlap(player, pool).is_some()
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;

    fn pool_with_monster_at(pos: DVec2) -> MonsterPool {
        let mut pool = MonsterPool::new(4, DVec2::splat(30.0));
        if let Some(m) = pool.slot_mut(2) {
            m.active = true;
            m.pos = pos;
        }
        pool
    }

    #[test]
    fn test_overlap_detected() {
        let player = Rect::new(100.0, 100.0, 50.0, 50.0);
        let pool = pool_with_monster_at(DVec2::new(130.0, 130.0));
        assert_eq!(first_overlap(&player, &pool), Some(2));
        assert!(has_collision(&player, &pool, EffectSnapshot::default()));
    }

    #[test]
    fn test_shield_blocks_full_overlap() {
        let player = Rect::new(100.0, 100.0, 50.0, 50.0);
        let pool = pool_with_monster_at(DVec2::new(110.0, 110.0));
        let shielded = EffectSnapshot {
            shielded: true,
            ..Default::default()
        };
        assert!(!has_collision(&player, &pool, shielded));
    }

    #[test]
    fn test_inactive_slots_ignored() {
        let player = Rect::new(100.0, 100.0, 50.0, 50.0);
        let mut pool = pool_with_monster_at(DVec2::new(110.0, 110.0));
        if let Some(m) = pool.slot_mut(2) {
            m.deactivate();
        }
        assert!(!has_collision(&player, &pool, EffectSnapshot::default()));
    }

    #[test]
    fn test_touching_is_not_collision() {
        let player = Rect::new(100.0, 100.0, 50.0, 50.0);
        let pool = pool_with_monster_at(DVec2::new(150.0, 100.0));
        assert!(!has_collision(&player, &pool, EffectSnapshot::default()));
    }
}
