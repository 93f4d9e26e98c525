//! Messages passed between the runner and its worker threads.

use wavedodge_core::commands::{InputFrame, PlayerCommand};
use wavedodge_economy::PlayerProfile;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// One frame of raw input, expanded into player commands.
    Input(InputFrame),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Requests handled by the persistence worker.
#[derive(Debug)]
pub enum PersistenceRequest {
    Save { key: String, profile: Box<PlayerProfile> },
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use wavedodge_core::enums::AbilityKind;

    #[test]
    fn test_command_channel_preserves_order() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Activate {
            ability: AbilityKind::Dash,
        }))
        .unwrap();
        tx.send(GameLoopCommand::Input(InputFrame::default())).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::Activate { .. })
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }
}
