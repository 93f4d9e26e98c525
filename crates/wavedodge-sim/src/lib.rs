//! Simulation engine for WAVEDODGE.
//!
//! Owns the player, the fixed monster pool and the ability timers, runs the
//! systems in a fixed order each tick, and produces `GameStateSnapshot`s.

pub mod abilities;
pub mod engine;
pub mod entities;
pub mod systems;
pub mod wave;

pub use engine::{SimConfig, SimulationEngine};
pub use wavedodge_core as core;
