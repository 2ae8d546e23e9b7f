//! Balance data and pure behavior functions for Obsidian Core.
//!
//! Hostile and turret profiles, the wave table with its spawn mix,
//! narrative cue scheduling and the lanes hostiles walk.
//! No ECS dependency. Everything here operates on plain data.

pub mod arsenal;
pub mod narrative;
pub mod profiles;
pub mod route;
pub mod waves;

pub use obsidian_core as core;
