//! Obsidian Core headless runner.
//!
//! Wires the simulation engine to a fixed-rate game loop thread and a
//! scripted autopilot so sessions can run without a front end.

pub mod autopilot;
pub mod game_loop;
pub mod state;

pub use obsidian_core as core;
