//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz). Ability timers are counted in ticks at this rate.
pub const TICK_RATE: u32 = 60;

// --- Arena ---

/// Logical arena width in pixels.
pub const ARENA_WIDTH: f64 = 800.0;

/// Logical arena height in pixels.
pub const ARENA_HEIGHT: f64 = 800.0;

/// Spawn positions along an edge stay this far from the corners.
pub const SPAWN_EDGE_INSET: f64 = 50.0;

/// Monsters despawn once they are this far beyond any arena edge.
pub const DESPAWN_MARGIN: f64 = 50.0;

// --- Player ---

pub const PLAYER_WIDTH: f64 = 50.0;
pub const PLAYER_HEIGHT: f64 = 50.0;

/// Pixels moved per tick per held direction.
pub const PLAYER_SPEED: f64 = 5.0;

/// Top-left corner of the player at the start of every run.
pub const PLAYER_SPAWN_X: f64 = 375.0;
pub const PLAYER_SPAWN_Y: f64 = 375.0;

// --- Monsters ---

/// Fixed number of monster slots. Never grows.
pub const MONSTER_POOL_CAPACITY: usize = 30;

pub const MONSTER_WIDTH: f64 = 30.0;
pub const MONSTER_HEIGHT: f64 = 30.0;

// --- Waves ---

pub const INITIAL_WAVE: u32 = 1;

/// Monsters spawned in wave 1.
pub const INITIAL_QUOTA: u32 = 5;

/// Quota growth per cleared wave.
pub const QUOTA_STEP: u32 = 1;

/// Monster speed (px/tick) in wave 1.
pub const BASE_MONSTER_SPEED: f64 = 3.2;

/// Additional monster speed per wave past the first.
pub const SPEED_PER_WAVE: f64 = 0.3;

/// First wave in which the faster monster type appears.
pub const SPEED_TYPE_UNLOCK_WAVE: u32 = 10;

/// Velocity multiplier applied to the faster monster type.
pub const SPEED_TYPE_MULTIPLIER: f64 = 1.5;

// --- Abilities ---

/// Per-axis scale for a diagonal dash. Approximates 1/sqrt(2).
pub const DASH_DIAGONAL_FACTOR: f64 = 0.707;

/// Coins paid out per despawned monster.
pub const CURRENCY_PER_DESPAWN: u32 = 1;

/// Base (level 0) ability parameters in seconds / pixels.
pub const DASH_BASE_COOLDOWN_SECS: f64 = 3.0;
pub const DASH_BASE_DISTANCE: f64 = 100.0;
pub const SHIELD_BASE_COOLDOWN_SECS: f64 = 10.0;
pub const SHIELD_BASE_DURATION_SECS: f64 = 3.0;
pub const SLOW_BASE_COOLDOWN_SECS: f64 = 15.0;
pub const SLOW_BASE_DURATION_SECS: f64 = 5.0;
pub const SLOW_BASE_FACTOR: f64 = 0.3;
pub const STOP_BASE_COOLDOWN_SECS: f64 = 60.0;
pub const STOP_BASE_DURATION_SECS: f64 = 3.0;

/// Convert seconds to whole ticks at TICK_RATE (floored).
pub fn secs_to_ticks(secs: f64) -> u32 {
    (secs * TICK_RATE as f64).floor().max(0.0) as u32
}
