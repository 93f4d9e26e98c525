//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    GameOver,
}

/// The four player abilities (H/J/K/L on the keyboard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Instant reposition in the held direction.
    Dash,
    /// Collision immunity for a duration.
    Shield,
    /// Scales monster velocity by the slow factor for a duration.
    Slow,
    /// Freezes every monster for a duration.
    Stop,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 4] = [
        AbilityKind::Dash,
        AbilityKind::Shield,
        AbilityKind::Slow,
        AbilityKind::Stop,
    ];

    /// Dash resolves immediately; the others run on a duration timer.
    pub fn is_instant(self) -> bool {
        matches!(self, AbilityKind::Dash)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AbilityKind::Dash => "dash",
            AbilityKind::Shield => "shield",
            AbilityKind::Slow => "slow",
            AbilityKind::Stop => "stop",
        }
    }
}

/// Monster archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    #[default]
    Normal,
    /// Faster variant mixed into waves past the unlock threshold.
    Speed,
}

impl MonsterKind {
    /// Render color tag.
    pub fn color_tag(self) -> &'static str {
        match self {
            MonsterKind::Normal => "#FF0000",
            MonsterKind::Speed => "#FF8800",
        }
    }
}

/// Arena edge a monster enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl ArenaEdge {
    pub const ALL: [ArenaEdge; 4] = [
        ArenaEdge::Top,
        ArenaEdge::Right,
        ArenaEdge::Bottom,
        ArenaEdge::Left,
    ];
}

/// Why an ability activation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Not unlocked by the economy.
    Locked,
    /// Cooldown still running.
    OnCooldown,
}
