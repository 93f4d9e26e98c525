//! Systems run by the engine each tick.
//!
//! Systems are free functions over the engine's entity state. They do not own
//! state, and every ability effect reaches them through one `EffectSnapshot`.

pub mod collision;
pub mod movement;
pub mod player;
pub mod snapshot;
pub mod spawner;
