//! Autopilot: turns snapshots into input frames so the runner can play
//! without a human.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use wavedodge_core::commands::InputFrame;
use wavedodge_core::config::ArenaConfig;
use wavedodge_core::enums::{AbilityKind, GamePhase};
use wavedodge_core::state::GameStateSnapshot;

/// Push magnitudes below this are treated as "stand still" on that axis.
const DEADZONE: f64 = 0.05;

/// Pull toward the arena center when nothing is close.
const CENTER_PULL: f64 = 0.002;

pub trait Autopilot {
    fn id(&self) -> &'static str;
    fn reset(&mut self);
    fn next_input(&mut self, snapshot: &GameStateSnapshot) -> InputFrame;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotConfig {
    /// Monsters closer than this (center to center) repel the player.
    pub danger_radius: f64,
    pub dash_radius: f64,
    pub shield_radius: f64,
    /// Monsters inside the danger radius that trigger slow.
    pub slow_crowd: usize,
    /// Monsters inside the danger radius that trigger stop.
    pub stop_crowd: usize,
    pub wall_margin: f64,
    pub use_abilities: bool,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            danger_radius: 160.0,
            dash_radius: 70.0,
            shield_radius: 50.0,
            slow_crowd: 4,
            stop_crowd: 7,
            wall_margin: 80.0,
            use_abilities: true,
        }
    }
}

/// Repulsion-field bot: steers away from nearby monsters and the walls and
/// fires abilities when monsters get close.
#[derive(Debug, Clone)]
pub struct EvasionBot {
    config: AutopilotConfig,
    arena: ArenaConfig,
}

impl EvasionBot {
    pub fn new(config: AutopilotConfig, arena: ArenaConfig) -> Self {
        Self { config, arena }
    }

    fn steer(&self, me: DVec2, snapshot: &GameStateSnapshot) -> (DVec2, f64, usize) {
        let danger = self.config.danger_radius;
        let mut push = DVec2::ZERO;
        let mut nearest = f64::INFINITY;
        let mut crowd = 0;

        for monster in &snapshot.monsters {
            let away = me - monster.rect.center();
            let dist = away.length();
            nearest = nearest.min(dist);
            if dist < danger {
                crowd += 1;
                if dist > f64::EPSILON {
                    push += away / dist * (danger - dist) / danger;
                }
            }
        }

        let margin = self.config.wall_margin;
        if margin > 0.0 {
            push.x += ((margin - me.x) / margin).max(0.0);
            push.x -= ((me.x - (self.arena.width - margin)) / margin).max(0.0);
            push.y += ((margin - me.y) / margin).max(0.0);
            push.y -= ((me.y - (self.arena.height - margin)) / margin).max(0.0);
        }

        if crowd == 0 {
            let center = DVec2::new(self.arena.width, self.arena.height) / 2.0;
            push += (center - me) * CENTER_PULL;
        }

        (push, nearest, crowd)
    }
}

impl Autopilot for EvasionBot {
    fn id(&self) -> &'static str {
        "evasion"
    }

    fn reset(&mut self) {}

    fn next_input(&mut self, snapshot: &GameStateSnapshot) -> InputFrame {
        if snapshot.phase == GamePhase::GameOver {
            return InputFrame::default();
        }

        let me = snapshot.player.center();
        let (push, nearest, crowd) = self.steer(me, snapshot);
        let mut frame = InputFrame {
            move_left: push.x < -DEADZONE,
            move_right: push.x > DEADZONE,
            move_up: push.y < -DEADZONE,
            move_down: push.y > DEADZONE,
            ..Default::default()
        };

        if !self.config.use_abilities {
            return frame;
        }

        let ready = |kind: AbilityKind| {
            let view = snapshot.abilities.get(kind);
            view.unlocked && view.cooldown_remaining == 0 && !view.active
        };
        let effects = snapshot.effects;

        if nearest < self.config.shield_radius && ready(AbilityKind::Shield) && !effects.shielded {
            frame.activate_shield = true;
        } else if nearest < self.config.dash_radius && ready(AbilityKind::Dash) && !effects.shielded {
            frame.activate_dash = true;
        }

        if crowd >= self.config.stop_crowd && ready(AbilityKind::Stop) {
            frame.activate_stop = true;
        } else if crowd >= self.config.slow_crowd && ready(AbilityKind::Slow) && !effects.stopped {
            frame.activate_slow = true;
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavedodge_core::enums::MonsterKind;
    use wavedodge_core::state::{AbilityView, MonsterView};
    use wavedodge_core::types::Rect;

    fn snapshot_with(monsters: &[(f64, f64)]) -> GameStateSnapshot {
        let mut snapshot = GameStateSnapshot {
            player: Rect::new(375.0, 375.0, 50.0, 50.0),
            ..Default::default()
        };
        snapshot.monsters = monsters
            .iter()
            .enumerate()
            .map(|(slot, &(x, y))| MonsterView {
                slot,
                rect: Rect::new(x, y, 30.0, 30.0),
                kind: MonsterKind::Normal,
                color: MonsterKind::Normal.color_tag().to_string(),
            })
            .collect();
        snapshot.abilities.dash = AbilityView {
            unlocked: true,
            ..Default::default()
        };
        snapshot
    }

    fn bot() -> EvasionBot {
        EvasionBot::new(AutopilotConfig::default(), ArenaConfig::default())
    }

    #[test]
    fn test_flees_monster_on_the_left() {
        let frame = bot().next_input(&snapshot_with(&[(300.0, 385.0)]));
        assert!(frame.move_right);
        assert!(!frame.move_left);
    }

    #[test]
    fn test_close_monster_triggers_dash() {
        let frame = bot().next_input(&snapshot_with(&[(400.0, 330.0)]));
        assert!(frame.activate_dash);
        assert!(frame.move_down);
        assert!(!frame.activate_shield);
    }

    #[test]
    fn test_locked_or_cooling_abilities_not_used() {
        let mut snapshot = snapshot_with(&[(400.0, 330.0)]);
        snapshot.abilities.dash.cooldown_remaining = 10;
        let frame = bot().next_input(&snapshot);
        assert!(!frame.activate_dash);
        assert!(!frame.activate_shield);
    }

    #[test]
    fn test_crowd_triggers_slow() {
        let mut snapshot = snapshot_with(&[
            (300.0, 300.0),
            (500.0, 300.0),
            (300.0, 500.0),
            (480.0, 480.0),
        ]);
        snapshot.abilities.slow = AbilityView {
            unlocked: true,
            ..Default::default()
        };
        let frame = bot().next_input(&snapshot);
        assert!(frame.activate_slow);
        assert!(!frame.activate_stop);
    }

    #[test]
    fn test_crowd_counts_only_monsters_inside_danger_radius() {
        // Fourth center sits at (515, 515), about 162.6 px away.
        let mut snapshot = snapshot_with(&[
            (300.0, 300.0),
            (500.0, 300.0),
            (300.0, 500.0),
            (500.0, 500.0),
        ]);
        snapshot.abilities.slow = AbilityView {
            unlocked: true,
            ..Default::default()
        };
        let frame = bot().next_input(&snapshot);
        assert!(!frame.activate_slow);
    }

    #[test]
    fn test_walls_push_inward() {
        let mut snapshot = snapshot_with(&[]);
        snapshot.player = Rect::new(0.0, 0.0, 50.0, 50.0);
        let frame = bot().next_input(&snapshot);
        assert!(frame.move_right);
        assert!(frame.move_down);
    }

    #[test]
    fn test_idle_after_game_over() {
        let mut snapshot = snapshot_with(&[(380.0, 380.0)]);
        snapshot.phase = GamePhase::GameOver;
        assert_eq!(bot().next_input(&snapshot), InputFrame::default());
    }
}
