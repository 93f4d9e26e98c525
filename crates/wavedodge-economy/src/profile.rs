//! Player profile: coins, lifetime stats, unlocks and upgrade levels.
//!
//! The profile is fed the simulation's events after each tick. It never
//! talks back to the simulation except through `loadout()`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use wavedodge_core::enums::AbilityKind;
use wavedodge_core::events::GameEvent;
use wavedodge_core::loadout::AbilityLoadout;

use crate::error::EconomyError;
use crate::upgrades::{self, UpgradeLevels, MAX_UPGRADE_LEVEL};

/// Every this many lifetime avoids pays a bonus.
pub const AVOID_BONUS_INTERVAL: u64 = 10;
pub const AVOID_BONUS_COINS: u32 = 2;

/// Finished runs kept in `history`, newest last.
pub const RUN_HISTORY_LIMIT: usize = 50;

/// Summary of one finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub wave_number: u32,
    pub monsters_avoided: u32,
    /// Coins earned during the run, bonuses included.
    pub coins_earned: u32,
    /// The run beat the previous best wave.
    pub new_record: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProfile {
    pub coins: u32,
    pub total_monsters_avoided: u64,
    /// Highest wave ever reached.
    pub best_wave: u32,
    pub games_played: u32,
    pub unlocked: Vec<AbilityKind>,
    pub levels: UpgradeLevels,
    pub history: Vec<RunRecord>,
    #[serde(skip)]
    run: RunTally,
}

/// In-progress run counters. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RunTally {
    coins: u32,
    new_record: bool,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            coins: 0,
            total_monsters_avoided: 0,
            best_wave: 0,
            games_played: 0,
            unlocked: vec![AbilityKind::Dash],
            levels: UpgradeLevels::default(),
            history: Vec::new(),
            run: RunTally::default(),
        }
    }
}

impl PlayerProfile {
    /// Dash is never gated, whatever the saved unlock list says.
    pub fn is_unlocked(&self, kind: AbilityKind) -> bool {
        kind == AbilityKind::Dash || self.unlocked.contains(&kind)
    }

    /// Loadout for the simulation from the current unlocks and levels.
    pub fn loadout(&self) -> AbilityLoadout {
        upgrades::build_loadout(|kind| self.is_unlocked(kind), &self.levels)
    }

    /// Coins earned so far in the run in progress.
    pub fn run_coins(&self) -> u32 {
        self.run.coins
    }

    /// Fold one simulation event into the profile. Returns the run record
    /// when the event ends a run.
    pub fn apply_event(&mut self, event: &GameEvent) -> Option<RunRecord> {
        match *event {
            GameEvent::CurrencyEarned { amount } => {
                self.earn(amount);
            }
            GameEvent::MonsterAvoided { .. } => {
                self.total_monsters_avoided += 1;
                if self.total_monsters_avoided % AVOID_BONUS_INTERVAL == 0 {
                    debug!(total = self.total_monsters_avoided, "avoid bonus");
                    self.earn(AVOID_BONUS_COINS);
                }
            }
            GameEvent::WaveReached { wave_number } => {
                self.note_wave(wave_number);
            }
            GameEvent::GameOver {
                wave_number,
                monsters_avoided,
            } => {
                self.note_wave(wave_number);
                return Some(self.finish_run(wave_number, monsters_avoided));
            }
            GameEvent::Restarted => {
                self.run = RunTally::default();
            }
            _ => {}
        }
        None
    }

    /// Fold a batch of events. Returns the records of every run that ended.
    pub fn apply_events<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a GameEvent>,
    ) -> Vec<RunRecord> {
        events
            .into_iter()
            .filter_map(|event| self.apply_event(event))
            .collect()
    }

    /// Deduct coins. Fails without changing anything when short.
    pub fn spend(&mut self, amount: u32) -> Result<(), EconomyError> {
        if self.coins < amount {
            return Err(EconomyError::InsufficientCoins {
                have: self.coins,
                need: amount,
            });
        }
        self.coins -= amount;
        Ok(())
    }

    /// Buy an ability unlock. Returns the price paid.
    pub fn unlock(&mut self, kind: AbilityKind) -> Result<u32, EconomyError> {
        if self.is_unlocked(kind) {
            return Err(EconomyError::AlreadyUnlocked(kind));
        }
        let cost = upgrades::unlock_cost(kind).ok_or(EconomyError::AlreadyUnlocked(kind))?;
        self.spend(cost)?;
        self.unlocked.push(kind);
        info!(ability = kind.as_str(), cost, "ability unlocked");
        Ok(cost)
    }

    /// Buy the next upgrade level of an unlocked ability. Returns the price
    /// paid.
    pub fn upgrade(&mut self, kind: AbilityKind) -> Result<u32, EconomyError> {
        if !self.is_unlocked(kind) {
            return Err(EconomyError::Locked(kind));
        }
        let current = self.levels.level_for(kind);
        let cost = upgrades::upgrade_cost(kind, current).ok_or(EconomyError::MaxLevel {
            ability: kind,
            level: MAX_UPGRADE_LEVEL,
        })?;
        self.spend(cost)?;
        self.levels.set_level(kind, current + 1);
        info!(ability = kind.as_str(), level = current + 1, cost, "ability upgraded");
        Ok(cost)
    }

    fn earn(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
        self.run.coins = self.run.coins.saturating_add(amount);
    }

    fn note_wave(&mut self, wave_number: u32) {
        if wave_number > self.best_wave {
            self.best_wave = wave_number;
            self.run.new_record = true;
        }
    }

    fn finish_run(&mut self, wave_number: u32, monsters_avoided: u32) -> RunRecord {
        let record = RunRecord {
            wave_number,
            monsters_avoided,
            coins_earned: self.run.coins,
            new_record: self.run.new_record,
        };
        self.games_played += 1;
        self.history.push(record);
        if self.history.len() > RUN_HISTORY_LIMIT {
            let excess = self.history.len() - RUN_HISTORY_LIMIT;
            self.history.drain(..excess);
        }
        self.run = RunTally::default();
        info!(
            wave = wave_number,
            avoided = monsters_avoided,
            coins = record.coins_earned,
            new_record = record.new_record,
            "run recorded"
        );
        record
    }
}
