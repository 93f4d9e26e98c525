//! Headless WAVEDODGE runner: configuration, the real-time game loop thread,
//! the persistence worker and the autopilot that stands in for a player.

pub mod autopilot;
pub mod config;
pub mod game_loop;
pub mod persistence;
pub mod runner;
pub mod state;
