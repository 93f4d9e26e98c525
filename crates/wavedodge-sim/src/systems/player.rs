//! Player movement from held direction flags.

use glam::DVec2;

use wavedodge_core::commands::MoveIntent;
use wavedodge_core::config::ArenaConfig;

use crate::entities::Player;

/// Move the player by `speed` per held axis and clamp to the arena.
/// Opposing directions cancel out.
pub fn run(player: &mut Player, intent: MoveIntent, arena: &ArenaConfig) {
    if !intent.any() {
        return;
    }
    let mut step = DVec2::ZERO;
    if intent.left {
        step.x -= player.speed;
    }
    if intent.right {
        step.x += player.speed;
    }
    if intent.up {
        step.y -= player.speed;
    }
    if intent.down {
        step.y += player.speed;
    }
    player.pos += step;
    player.clamp_to(arena);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_moves_per_axis() {
        let arena = ArenaConfig::default();
        let mut player = Player::spawn(&arena);
        let intent = MoveIntent {
            right: true,
            up: true,
            ..Default::default()
        };
        run(&mut player, intent, &arena);
        assert_eq!(player.pos, DVec2::new(380.0, 370.0));
    }

    #[test]
    fn test_player_clamped_to_arena() {
        let arena = ArenaConfig::default();
        let mut player = Player::spawn(&arena);
        player.pos = DVec2::new(2.0, 748.0);
        let intent = MoveIntent {
            left: true,
            down: true,
            ..Default::default()
        };
        run(&mut player, intent, &arena);
        assert_eq!(player.pos, DVec2::new(0.0, 750.0));
    }

    #[test]
    fn test_opposing_directions_cancel() {
        let arena = ArenaConfig::default();
        let mut player = Player::spawn(&arena);
        let intent = MoveIntent {
            left: true,
            right: true,
            ..Default::default()
        };
        run(&mut player, intent, &arena);
        assert_eq!(player.pos, arena.player_spawn);
    }
}
