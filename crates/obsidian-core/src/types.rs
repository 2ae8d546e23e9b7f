//! Fundamental geometric and simulation types.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use glam::Vec2;

/// Identity of a hostile. Assigned in spawn order and never reused within a session,
/// so the numeric order doubles as the targeting tie-breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HostileId(pub u32);

/// Identity of a placed turret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TurretId(pub u32);

/// Identity of an in-flight projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

impl fmt::Display for HostileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hostile #{}", self.0)
    }
}

impl fmt::Display for TurretId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turret #{}", self.0)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each running tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Axis-aligned rectangle in playfield units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// The full playfield.
    pub fn playfield() -> Self {
        use crate::constants::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
        Self::new(Vec2::ZERO, Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT))
    }

    /// Whether `point` lies inside (edges inclusive).
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Whether `point` lies inside the rectangle grown by `margin` on every side.
    pub fn contains_with_margin(&self, point: Vec2, margin: f32) -> bool {
        let grown = Bounds::new(self.min - Vec2::splat(margin), self.max + Vec2::splat(margin));
        grown.contains(point)
    }
}

/// Position of the core's center.
pub fn core_position() -> Vec2 {
    Vec2::new(crate::constants::CORE_X, crate::constants::CORE_Y)
}
