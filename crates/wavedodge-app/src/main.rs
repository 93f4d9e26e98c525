//! WAVEDODGE headless runner.
//!
//! Usage:
//!   cargo run --release -p wavedodge-app -- --runs 5
//!   RUST_LOG=wavedodge_sim=debug cargo run -p wavedodge-app -- --realtime --ticks 3600

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wavedodge_app::autopilot::EvasionBot;
use wavedodge_app::config::AppConfig;
use wavedodge_app::persistence::PersistenceWorker;
use wavedodge_app::runner::{run_headless, run_realtime};
use wavedodge_economy::{JsonFileStore, ProfileStore};

#[derive(Parser)]
#[command(name = "wavedodge")]
#[command(about = "Run the WAVEDODGE simulation with the autopilot at the controls")]
struct Args {
    /// JSON config file; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Tick budget for the whole session
    #[arg(long)]
    ticks: Option<u64>,

    /// Runs to play; 0 plays until the tick budget is spent
    #[arg(long)]
    runs: Option<u32>,

    /// Directory for saved profiles
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Run on the 60 Hz loop thread instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log: String,

    /// Print the session summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }
    if let Some(runs) = args.runs {
        config.runs = runs;
    }
    if let Some(dir) = args.save_dir {
        config.save_dir = dir;
    }

    let store = Arc::new(JsonFileStore::new(&config.save_dir));
    let mut profile = store
        .load_or_default(&config.profile_key)
        .with_context(|| format!("failed to load profile {:?}", config.profile_key))?;
    let worker = PersistenceWorker::spawn(store).context("failed to start persistence worker")?;
    let mut bot = EvasionBot::new(config.autopilot, config.arena);

    let summary = if args.realtime {
        run_realtime(&config, &mut profile, &mut bot, Some(&worker))?
    } else {
        run_headless(&config, &mut profile, &mut bot, Some(&worker))
    };
    let saved = worker.shutdown();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("=== SESSION ===");
    println!("  Seed:       {}", config.seed);
    println!("  Ticks:      {}", summary.ticks);
    println!("  Runs:       {}", summary.runs.len());
    for (i, run) in summary.runs.iter().enumerate() {
        println!(
            "    #{:<3} wave {:>3}  avoided {:>5}  coins {:>5}{}",
            i + 1,
            run.wave_number,
            run.monsters_avoided,
            run.coins_earned,
            if run.new_record { "  new record" } else { "" }
        );
    }
    println!("  Best wave:  {}", summary.best_wave);
    println!("  Coins:      {}", summary.coins);
    println!("  Saves:      {saved}");
    Ok(())
}
