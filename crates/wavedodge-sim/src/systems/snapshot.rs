//! Snapshot system: builds a `GameStateSnapshot` from engine state.
//!
//! Read-only; never modifies the entities it inspects.

use wavedodge_core::enums::GamePhase;
use wavedodge_core::events::GameEvent;
use wavedodge_core::state::{AbilitiesView, EffectSnapshot, GameStateSnapshot, MonsterView};
use wavedodge_core::types::SimTime;

use crate::entities::{MonsterPool, Player};
use crate::wave::WaveState;

#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    time: &SimTime,
    phase: GamePhase,
    player: &Player,
    pool: &MonsterPool,
    abilities: AbilitiesView,
    wave: &WaveState,
    effects: EffectSnapshot,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        player: player.rect(),
        monsters: build_monsters(pool),
        abilities,
        wave: wave.view(),
        effects,
        events,
    }
}

/// Active monsters in slot order.
fn build_monsters(pool: &MonsterPool) -> Vec<MonsterView> {
    pool.iter_active()
        .map(|(slot, monster)| MonsterView {
            slot,
            rect: monster.rect(),
            kind: monster.kind,
            color: monster.kind.color_tag().to_string(),
        })
        .collect()
}
