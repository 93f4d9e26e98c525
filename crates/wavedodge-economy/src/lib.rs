//! Upgrade economy and profile persistence for WAVEDODGE.
//!
//! Consumes the simulation's `GameEvent`s, owns coins, unlocks and upgrade
//! levels, and turns them into the `AbilityLoadout` the simulation runs on.
//! Persistence is a black-box key/value store behind `ProfileStore`.

pub mod error;
pub mod profile;
pub mod store;
pub mod upgrades;

pub use error::{EconomyError, StoreError};
pub use profile::{PlayerProfile, RunRecord};
pub use store::{JsonFileStore, MemoryStore, ProfileStore};

#[cfg(test)]
mod tests;
