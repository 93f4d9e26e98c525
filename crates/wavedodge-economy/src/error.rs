use thiserror::Error;

use wavedodge_core::enums::AbilityKind;

/// Refused shop operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EconomyError {
    #[error("{} is locked", .0.as_str())]
    Locked(AbilityKind),
    #[error("{} is already unlocked", .0.as_str())]
    AlreadyUnlocked(AbilityKind),
    #[error("{} is already at max level {level}", .ability.as_str())]
    MaxLevel { ability: AbilityKind, level: u32 },
    #[error("insufficient coins: have {have}, need {need}")]
    InsufficientCoins { have: u32, need: u32 },
}

/// Profile store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile store io: {0}")]
    Io(#[from] std::io::Error),
    #[error("profile serialization: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid profile key {0:?}")]
    InvalidKey(String),
}
