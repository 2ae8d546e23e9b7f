//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{HostileId, ProjectileId, TurretId, Vec2};

/// Position on the playfield.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Hit points. `current` stays within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// Hostile unit data fixed at spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub id: HostileId,
    pub kind: HostileKind,
    /// Wave this hostile belongs to. Gates wave completion.
    pub wave: u8,
    /// Base speed in playfield units per tick.
    pub speed: f32,
    /// Credits granted on kill before the economy multiplier.
    pub reward: u32,
    /// Core damage dealt on arrival.
    pub contact_damage: f32,
}

/// Progress along an assigned lane.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathProgress {
    /// Index into the session's lane list.
    pub lane: usize,
    /// Distance covered so far. Never decreases.
    pub travelled: f32,
    /// Distance left to the end of the lane. Lower means closer to the core.
    pub remaining: f32,
}

/// Movement slow applied by shock payloads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Slowed {
    /// Speed multiplier in (0, 1].
    pub multiplier: f32,
    pub remaining_ticks: u32,
}

/// Periodically summons minions (necromancers).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Summoner {
    pub ticks_until_summon: u32,
}

/// Marker: health reached zero this tick. Awaiting reward crediting and removal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dying;

/// Placed defensive unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turret {
    pub id: TurretId,
    pub kind: TurretKind,
    /// Ticks until the turret may fire again.
    pub cooldown: u32,
    /// Hostile chosen on the last firing attempt. A weak key, re-validated every use.
    pub target: Option<HostileId>,
}

/// Effect carried by a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    Direct,
    /// Flat damage to every hostile within `radius` of the impact point.
    Splash { radius: f32 },
    /// Damage plus a movement slow.
    Slow { multiplier: f32, duration_ticks: u32 },
    /// Restores core health.
    Heal,
}

/// What a projectile is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileTarget {
    Hostile(HostileId),
    Core,
}

/// In-flight projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    /// Kind of the turret that fired it.
    pub source: TurretKind,
    /// Damage (or healing) at impact, upgrades already applied.
    pub amount: f32,
    pub payload: Payload,
    pub delivery: Delivery,
    pub target: ProjectileTarget,
    /// Target position as of the last tick it was seen.
    pub last_known: Vec2,
    /// Playfield units per tick.
    pub speed: f32,
    /// Ticks since launch.
    pub age: u32,
}
