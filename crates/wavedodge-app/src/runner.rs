//! Drives the engine with the autopilot, folds events into the profile and
//! hands finished runs to the persistence worker.

use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use wavedodge_core::commands::PlayerCommand;
use wavedodge_core::enums::AbilityKind;
use wavedodge_economy::upgrades::{unlock_cost, upgrade_cost};
use wavedodge_economy::{PlayerProfile, RunRecord};
use wavedodge_sim::SimulationEngine;

use crate::autopilot::Autopilot;
use crate::config::AppConfig;
use crate::game_loop::{spawn_game_loop, TICK_DURATION};
use crate::persistence::PersistenceWorker;
use crate::state::GameLoopCommand;

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub runs: Vec<RunRecord>,
    pub best_wave: u32,
    pub coins: u32,
}

/// One purchase made between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purchase {
    Unlock(AbilityKind),
    Upgrade(AbilityKind),
}

/// Buy the cheapest affordable unlock or upgrade until nothing is
/// affordable.
pub fn auto_shop(profile: &mut PlayerProfile) -> Vec<Purchase> {
    let mut bought = Vec::new();
    loop {
        let cheapest = AbilityKind::ALL
            .into_iter()
            .filter_map(|kind| {
                if profile.is_unlocked(kind) {
                    upgrade_cost(kind, profile.levels.level_for(kind))
                        .map(|cost| (cost, Purchase::Upgrade(kind)))
                } else {
                    unlock_cost(kind).map(|cost| (cost, Purchase::Unlock(kind)))
                }
            })
            .filter(|(cost, _)| *cost <= profile.coins)
            .min_by_key(|(cost, _)| *cost);

        let Some((_, purchase)) = cheapest else {
            return bought;
        };
        let result = match purchase {
            Purchase::Unlock(kind) => profile.unlock(kind),
            Purchase::Upgrade(kind) => profile.upgrade(kind),
        };
        if result.is_err() {
            return bought;
        }
        bought.push(purchase);
    }
}

/// What to do after a run ends.
fn after_run(
    config: &AppConfig,
    profile: &mut PlayerProfile,
    runs_done: usize,
    persistence: Option<&PersistenceWorker>,
) -> Option<Vec<PlayerCommand>> {
    let finished = config.runs > 0 && runs_done >= config.runs as usize;
    if !finished && config.auto_shop {
        let bought = auto_shop(profile);
        if !bought.is_empty() {
            info!(purchases = bought.len(), coins = profile.coins, "shop between runs");
        }
    }
    if let Some(worker) = persistence {
        worker.save(&config.profile_key, profile);
    }
    if finished {
        return None;
    }
    Some(vec![
        PlayerCommand::ApplyLoadout {
            loadout: profile.loadout(),
        },
        PlayerCommand::Restart,
    ])
}

fn summarize(ticks: u64, runs: Vec<RunRecord>, profile: &PlayerProfile) -> RunSummary {
    RunSummary {
        ticks,
        runs,
        best_wave: profile.best_wave,
        coins: profile.coins,
    }
}

/// Run as fast as possible for up to `config.ticks` ticks or `config.runs`
/// runs, whichever comes first. `runs == 0` means no run limit.
pub fn run_headless(
    config: &AppConfig,
    profile: &mut PlayerProfile,
    bot: &mut dyn Autopilot,
    persistence: Option<&PersistenceWorker>,
) -> RunSummary {
    let mut engine = SimulationEngine::new(config.sim_config(profile.loadout()));
    let mut snapshot = engine.snapshot();
    let mut runs = Vec::new();
    let mut ticks = 0;
    bot.reset();

    while ticks < config.ticks {
        let frame = bot.next_input(&snapshot);
        engine.apply_input(&frame);
        snapshot = engine.tick();
        ticks += 1;

        let finished = profile.apply_events(&snapshot.events);
        if finished.is_empty() {
            continue;
        }
        runs.extend(finished);
        match after_run(config, profile, runs.len(), persistence) {
            Some(commands) => {
                engine.queue_commands(commands);
                bot.reset();
            }
            None => break,
        }
    }

    info!(ticks, runs = runs.len(), bot = bot.id(), "headless session finished");
    summarize(ticks, runs, profile)
}

/// Run on the 60 Hz game loop thread, polling the latest snapshot once per
/// tick and feeding the autopilot's input back over the command channel.
pub fn run_realtime(
    config: &AppConfig,
    profile: &mut PlayerProfile,
    bot: &mut dyn Autopilot,
    persistence: Option<&PersistenceWorker>,
) -> Result<RunSummary> {
    let handle = spawn_game_loop(config.sim_config(profile.loadout()))?;
    let mut runs = Vec::new();
    let mut polls = 0;
    bot.reset();

    'session: while polls < config.ticks {
        std::thread::sleep(TICK_DURATION);
        polls += 1;

        if let Some(snapshot) = handle.latest() {
            handle.send(GameLoopCommand::Input(bot.next_input(&snapshot)));
        }

        for event in handle.events.try_iter() {
            let Some(record) = profile.apply_event(&event) else {
                continue;
            };
            runs.push(record);
            match after_run(config, profile, runs.len(), persistence) {
                Some(commands) => {
                    for command in commands {
                        handle.send(GameLoopCommand::PlayerCommand(command));
                    }
                    bot.reset();
                }
                None => break 'session,
            }
        }
    }

    let ticks = handle.shutdown();
    info!(
        ticks,
        runs = runs.len(),
        elapsed = ?Duration::from_secs_f64(ticks as f64 * TICK_DURATION.as_secs_f64()),
        "real-time session finished"
    );
    Ok(summarize(ticks, runs, profile))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::autopilot::{AutopilotConfig, EvasionBot};
    use wavedodge_core::commands::InputFrame;
    use wavedodge_core::state::GameStateSnapshot;
    use wavedodge_economy::{MemoryStore, ProfileStore};

    /// Stands still forever.
    struct IdleBot;

    impl Autopilot for IdleBot {
        fn id(&self) -> &'static str {
            "idle"
        }

        fn reset(&mut self) {}

        fn next_input(&mut self, _snapshot: &GameStateSnapshot) -> InputFrame {
            InputFrame::default()
        }
    }

    #[test]
    fn test_auto_shop_buys_cheapest_first() {
        let mut profile = PlayerProfile::default();
        profile.coins = 100;
        let bought = auto_shop(&mut profile);
        assert_eq!(
            bought,
            vec![Purchase::Upgrade(AbilityKind::Dash), Purchase::Unlock(AbilityKind::Shield)]
        );
        assert_eq!(profile.coins, 22);
    }

    #[test]
    fn test_auto_shop_with_no_coins_buys_nothing() {
        let mut profile = PlayerProfile::default();
        assert!(auto_shop(&mut profile).is_empty());
    }

    #[test]
    fn test_idle_player_loses_and_run_is_recorded() {
        let config = AppConfig {
            runs: 1,
            ticks: 10_000,
            ..Default::default()
        };
        let mut profile = PlayerProfile::default();
        let store = Arc::new(MemoryStore::new());
        let worker = PersistenceWorker::spawn(store.clone()).unwrap();

        let summary = run_headless(&config, &mut profile, &mut IdleBot, Some(&worker));
        assert_eq!(summary.runs.len(), 1);
        assert!(summary.ticks < config.ticks);
        assert_eq!(profile.games_played, 1);
        assert_eq!(summary.best_wave, summary.runs[0].wave_number);

        assert_eq!(worker.shutdown(), 1);
        let saved = store.load(&config.profile_key).unwrap().unwrap();
        assert_eq!(saved.games_played, 1);
    }

    #[test]
    fn test_multiple_runs_restart_the_engine() {
        let config = AppConfig {
            runs: 3,
            ticks: 100_000,
            ..Default::default()
        };
        let mut profile = PlayerProfile::default();
        let summary = run_headless(&config, &mut profile, &mut IdleBot, None);
        assert_eq!(summary.runs.len(), 3);
        assert_eq!(profile.games_played, 3);
        assert_eq!(profile.history.len(), 3);
    }

    #[test]
    fn test_tick_budget_bounds_the_session() {
        let config = AppConfig {
            runs: 0,
            ticks: 500,
            ..Default::default()
        };
        let mut profile = PlayerProfile::default();
        let mut bot = EvasionBot::new(AutopilotConfig::default(), config.arena);
        let summary = run_headless(&config, &mut profile, &mut bot, None);
        assert_eq!(summary.ticks, 500);
    }

    #[test]
    fn test_headless_is_deterministic() {
        let config = AppConfig {
            runs: 2,
            ticks: 20_000,
            ..Default::default()
        };
        let run = || {
            let mut profile = PlayerProfile::default();
            let mut bot = EvasionBot::new(AutopilotConfig::default(), config.arena);
            let summary = run_headless(&config, &mut profile, &mut bot, None);
            serde_json::to_string(&summary).unwrap()
        };
        assert_eq!(run(), run());
    }
}
