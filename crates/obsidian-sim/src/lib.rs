//! Simulation engine for Obsidian Core.
//!
//! Owns the hecs ECS world, runs the phase systems once per fixed tick,
//! and produces `SimSnapshot`s for front ends.

pub mod economy;
pub mod engine;
pub mod session;
pub mod store;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use obsidian_core as core;
pub use obsidian_roster as roster;

#[cfg(test)]
mod tests;
