//! Runner configuration loaded from an optional JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use wavedodge_core::config::{ArenaConfig, DifficultyCurve};
use wavedodge_core::loadout::AbilityLoadout;
use wavedodge_sim::SimConfig;

use crate::autopilot::AutopilotConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub seed: u64,
    /// Tick budget across all runs.
    pub ticks: u64,
    /// Runs to play before stopping. A run ends at game over.
    pub runs: u32,
    pub save_dir: PathBuf,
    /// Key the profile is stored under.
    pub profile_key: String,
    /// Spend coins on unlocks and upgrades between runs.
    pub auto_shop: bool,
    pub arena: ArenaConfig,
    pub difficulty: DifficultyCurve,
    pub autopilot: AutopilotConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ticks: 36_000,
            runs: 1,
            save_dir: PathBuf::from("saves"),
            profile_key: "local".to_string(),
            auto_shop: true,
            arena: ArenaConfig::default(),
            difficulty: DifficultyCurve::default(),
            autopilot: AutopilotConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Load from `path` when given, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn sim_config(&self, loadout: AbilityLoadout) -> SimConfig {
        SimConfig {
            seed: self.seed,
            arena: self.arena,
            difficulty: self.difficulty,
            loadout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wavedodge.json");
        fs::write(
            &path,
            r#"{ "seed": 7, "runs": 3, "difficulty": { "initial_quota": 8 } }"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.runs, 3);
        assert_eq!(config.difficulty.initial_quota, 8);
        assert_eq!(config.difficulty.quota_step, 1);
        assert_eq!(config.profile_key, "local");
        assert_eq!(config.arena, ArenaConfig::default());
    }

    #[test]
    fn test_missing_config_is_error_with_path() {
        let err = AppConfig::load(Path::new("/nonexistent/wavedodge.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/wavedodge.json"));
    }

    #[test]
    fn test_sim_config_carries_settings() {
        let config = AppConfig {
            seed: 99,
            ..Default::default()
        };
        let sim = config.sim_config(AbilityLoadout::all_unlocked());
        assert_eq!(sim.seed, 99);
        assert!(sim.loadout.stop.unlocked);
    }
}
