//! Tests for the profile, the shop operations and the profile stores.

use wavedodge_core::enums::{AbilityKind, MonsterKind};
use wavedodge_core::events::GameEvent;

use crate::error::{EconomyError, StoreError};
use crate::profile::{PlayerProfile, RUN_HISTORY_LIMIT};
use crate::store::{JsonFileStore, MemoryStore, ProfileStore};
use crate::upgrades::{self, MAX_UPGRADE_LEVEL};

fn despawn_events(count: usize) -> Vec<GameEvent> {
    (0..count)
        .flat_map(|_| {
            [
                GameEvent::MonsterAvoided {
                    kind: MonsterKind::Normal,
                },
                GameEvent::CurrencyEarned { amount: 1 },
            ]
        })
        .collect()
}

fn game_over(wave_number: u32, monsters_avoided: u32) -> GameEvent {
    GameEvent::GameOver {
        wave_number,
        monsters_avoided,
    }
}

// ---- Currency ----

#[test]
fn test_coin_per_despawn_with_tenth_avoid_bonus() {
    let mut profile = PlayerProfile::default();
    profile.apply_events(&despawn_events(9));
    assert_eq!(profile.coins, 9);

    profile.apply_events(&despawn_events(1));
    assert_eq!(profile.coins, 12);
    assert_eq!(profile.total_monsters_avoided, 10);

    profile.apply_events(&despawn_events(10));
    assert_eq!(profile.coins, 24);
}

#[test]
fn test_bonus_counts_lifetime_avoids_across_runs() {
    let mut profile = PlayerProfile::default();
    profile.apply_events(&despawn_events(6));
    profile.apply_event(&game_over(2, 6));
    profile.apply_event(&GameEvent::Restarted);
    profile.apply_events(&despawn_events(4));
    assert_eq!(profile.coins, 12);
    assert_eq!(profile.run_coins(), 6);
}

// ---- Runs ----

#[test]
fn test_game_over_records_run() {
    let mut profile = PlayerProfile::default();
    profile.apply_events(&despawn_events(3));
    let records = profile.apply_events(&[
        GameEvent::WaveReached { wave_number: 2 },
        game_over(2, 3),
    ]);

    assert_eq!(records.len(), 1);
    let record = records[0];
    assert_eq!(record.wave_number, 2);
    assert_eq!(record.monsters_avoided, 3);
    assert_eq!(record.coins_earned, 3);
    assert!(record.new_record);
    assert_eq!(profile.best_wave, 2);
    assert_eq!(profile.games_played, 1);
    assert_eq!(profile.run_coins(), 0);
}

#[test]
fn test_new_record_only_when_best_beaten() {
    let mut profile = PlayerProfile::default();
    assert!(profile.apply_event(&game_over(5, 20)).unwrap().new_record);
    assert!(!profile.apply_event(&game_over(3, 9)).unwrap().new_record);
    assert!(!profile.apply_event(&game_over(5, 21)).unwrap().new_record);
    assert!(profile.apply_event(&game_over(6, 25)).unwrap().new_record);
    assert_eq!(profile.best_wave, 6);
    assert_eq!(profile.games_played, 4);
}

#[test]
fn test_history_is_bounded() {
    let mut profile = PlayerProfile::default();
    for wave in 1..=(RUN_HISTORY_LIMIT as u32 + 5) {
        profile.apply_event(&game_over(wave, 0));
    }
    assert_eq!(profile.history.len(), RUN_HISTORY_LIMIT);
    assert_eq!(profile.history[0].wave_number, 6);
}

// ---- Shop ----

#[test]
fn test_unlock_costs_and_errors() {
    let mut profile = PlayerProfile::default();
    assert_eq!(
        profile.unlock(AbilityKind::Dash),
        Err(EconomyError::AlreadyUnlocked(AbilityKind::Dash))
    );
    assert_eq!(
        profile.unlock(AbilityKind::Shield),
        Err(EconomyError::InsufficientCoins { have: 0, need: 50 })
    );

    profile.coins = 120;
    assert_eq!(profile.unlock(AbilityKind::Shield), Ok(50));
    assert_eq!(profile.coins, 70);
    assert!(profile.is_unlocked(AbilityKind::Shield));
    assert!(profile.loadout().shield.unlocked);
}

#[test]
fn test_dash_stays_unlocked_when_save_omits_it() {
    let mut profile: PlayerProfile =
        serde_json::from_str(r#"{ "coins": 5, "unlocked": ["Shield"] }"#).unwrap();
    assert!(profile.is_unlocked(AbilityKind::Dash));
    assert!(profile.loadout().dash.unlocked);
    assert_eq!(
        profile.unlock(AbilityKind::Dash),
        Err(EconomyError::AlreadyUnlocked(AbilityKind::Dash))
    );
    assert_eq!(profile.coins, 5);
}

#[test]
fn test_upgrade_requires_unlock_and_coins() {
    let mut profile = PlayerProfile::default();
    assert_eq!(
        profile.upgrade(AbilityKind::Slow),
        Err(EconomyError::Locked(AbilityKind::Slow))
    );

    profile.coins = 100;
    assert_eq!(profile.upgrade(AbilityKind::Dash), Ok(28));
    assert_eq!(profile.levels.dash, 1);
    assert_eq!(profile.coins, 72);
    assert_eq!(profile.upgrade(AbilityKind::Dash), Ok(62));
    assert_eq!(profile.coins, 10);
    assert_eq!(
        profile.upgrade(AbilityKind::Dash),
        Err(EconomyError::InsufficientCoins { have: 10, need: 109 })
    );
    assert_eq!(profile.levels.dash, 2);
}

#[test]
fn test_upgrade_stops_at_max_level() {
    let mut profile = PlayerProfile::default();
    profile.levels.dash = MAX_UPGRADE_LEVEL;
    profile.coins = u32::MAX;
    assert_eq!(
        profile.upgrade(AbilityKind::Dash),
        Err(EconomyError::MaxLevel {
            ability: AbilityKind::Dash,
            level: MAX_UPGRADE_LEVEL,
        })
    );
    assert_eq!(profile.coins, u32::MAX);
}

#[test]
fn test_loadout_follows_levels() {
    let mut profile = PlayerProfile::default();
    profile.levels.dash = 2;
    let loadout = profile.loadout();
    assert_eq!(loadout.dash.params, upgrades::params_for_level(AbilityKind::Dash, 2));
    assert_eq!(loadout.dash.params.magnitude, 119.0);
    assert!(!loadout.stop.unlocked);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        EconomyError::Locked(AbilityKind::Stop).to_string(),
        "stop is locked"
    );
    assert_eq!(
        EconomyError::InsufficientCoins { have: 3, need: 8 }.to_string(),
        "insufficient coins: have 3, need 8"
    );
}

// ---- Stores ----

#[test]
fn test_profile_serde_defaults_missing_fields() {
    let profile: PlayerProfile = serde_json::from_str(r#"{ "coins": 42 }"#).unwrap();
    assert_eq!(profile.coins, 42);
    assert!(profile.is_unlocked(AbilityKind::Dash));
    assert_eq!(profile.best_wave, 0);
}

#[test]
fn test_file_store_save_load_delete() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("profiles"));

    assert!(store.load("player-1").unwrap().is_none());
    assert!(store.keys().unwrap().is_empty());

    let mut profile = PlayerProfile::default();
    profile.coins = 77;
    profile.apply_event(&game_over(4, 12));
    store.save("player-1", &profile).unwrap();
    store.save("guest", &PlayerProfile::default()).unwrap();

    let loaded = store.load("player-1").unwrap().unwrap();
    assert_eq!(loaded, profile);
    assert_eq!(store.keys().unwrap(), vec!["guest", "player-1"]);

    store.delete("player-1").unwrap();
    store.delete("player-1").unwrap();
    assert!(store.load("player-1").unwrap().is_none());
}

#[test]
fn test_file_store_corrupt_file_is_serde_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    let store = JsonFileStore::new(dir.path());
    assert!(matches!(store.load("broken"), Err(StoreError::Serde(_))));
}

#[test]
fn test_store_rejects_path_like_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    let profile = PlayerProfile::default();
    assert!(matches!(
        store.save("../escape", &profile),
        Err(StoreError::InvalidKey(_))
    ));
    assert!(matches!(
        MemoryStore::new().load(""),
        Err(StoreError::InvalidKey(_))
    ));
}

#[test]
fn test_memory_store_roundtrip_and_default() {
    let store = MemoryStore::new();
    assert_eq!(store.load_or_default("p").unwrap(), PlayerProfile::default());

    let mut profile = PlayerProfile::default();
    profile.coins = 5;
    profile.unlocked.push(AbilityKind::Stop);
    store.save("p", &profile).unwrap();
    assert_eq!(store.load_or_default("p").unwrap(), profile);
    assert_eq!(store.keys().unwrap(), vec!["p"]);
}
