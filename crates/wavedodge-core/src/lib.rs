//! Core types and definitions for the WAVEDODGE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! commands, events, state snapshots, configuration and constants.
//! It has no dependency on any runtime or renderer.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod loadout;
pub mod state;
pub mod types;
