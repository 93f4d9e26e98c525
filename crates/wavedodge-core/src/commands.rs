//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::AbilityKind;
use crate::loadout::AbilityLoadout;

/// Held movement directions. Persist across ticks until replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Replace the held movement directions.
    SetMovement { intent: MoveIntent },
    /// Try to activate an ability. Silently refused when locked or cooling down.
    Activate { ability: AbilityKind },
    /// Start a new run. Only honored in GameOver.
    Restart,
    /// Upgrade or unlock change from the economy layer.
    ApplyLoadout { loadout: AbilityLoadout },
}

/// One frame of raw boolean input intents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub activate_dash: bool,
    pub activate_shield: bool,
    pub activate_slow: bool,
    pub activate_stop: bool,
    pub restart: bool,
}

impl MoveIntent {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

impl InputFrame {
    pub fn movement(&self) -> MoveIntent {
        MoveIntent {
            left: self.move_left,
            right: self.move_right,
            up: self.move_up,
            down: self.move_down,
        }
    }

    /// Translate the frame into queued commands. Movement comes first so a
    /// dash in the same frame uses this frame's direction.
    pub fn to_commands(&self) -> Vec<PlayerCommand> {
        let mut commands = vec![PlayerCommand::SetMovement {
            intent: self.movement(),
        }];
        let activations = [
            (self.activate_dash, AbilityKind::Dash),
            (self.activate_shield, AbilityKind::Shield),
            (self.activate_slow, AbilityKind::Slow),
            (self.activate_stop, AbilityKind::Stop),
        ];
        commands.extend(
            activations
                .into_iter()
                .filter(|(pressed, _)| *pressed)
                .map(|(_, ability)| PlayerCommand::Activate { ability }),
        );
        if self.restart {
            commands.push(PlayerCommand::Restart);
        }
        commands
    }
}
