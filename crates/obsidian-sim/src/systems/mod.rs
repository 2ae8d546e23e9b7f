//! Phase systems run once per tick, in this order:
//! wave spawning, movement, targeting, collision, rewards.
//!
//! Systems are free functions over the entity store and session state.
//! They keep no state of their own. `snapshot` is read-only.

pub mod collision;
pub mod movement;
pub mod rewards;
pub mod snapshot;
pub mod targeting;
pub mod wave_spawner;
