//! Turret roster: base stats and weapon behavior per kind.

use obsidian_core::components::Payload;
use obsidian_core::enums::{Delivery, TurretKind};

/// Base stats before upgrades.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurretStats {
    pub cost: u32,
    pub health: f32,
    /// Damage per shot, or healing for support kinds.
    pub damage: f32,
    /// Ticks between shots.
    pub cooldown: u32,
    pub range: f32,
    pub payload: Payload,
    pub delivery: Delivery,
    /// Playfield units per tick. Unused for instant delivery.
    pub projectile_speed: f32,
}

/// Get base stats for a turret kind.
pub fn get_stats(kind: TurretKind) -> TurretStats {
    match kind {
        TurretKind::Sentry => TurretStats {
            cost: 250,
            health: 150.0,
            damage: 90.0,
            cooldown: 25,
            range: 550.0,
            payload: Payload::Direct,
            delivery: Delivery::Homing,
            projectile_speed: 14.0,
        },
        TurretKind::Blaster => TurretStats {
            cost: 450,
            health: 180.0,
            damage: 70.0,
            cooldown: 35,
            range: 420.0,
            payload: Payload::Splash { radius: 70.0 },
            delivery: Delivery::Homing,
            projectile_speed: 11.0,
        },
        TurretKind::Shocker => TurretStats {
            cost: 550,
            health: 200.0,
            damage: 35.0,
            cooldown: 180,
            range: 420.0,
            payload: Payload::Slow {
                multiplier: 0.5,
                duration_ticks: 90,
            },
            delivery: Delivery::Instant,
            projectile_speed: 0.0,
        },
        TurretKind::Repeater => TurretStats {
            cost: 650,
            health: 180.0,
            damage: 55.0,
            cooldown: 10,
            range: 520.0,
            payload: Payload::Direct,
            delivery: Delivery::Homing,
            projectile_speed: 18.0,
        },
        TurretKind::Cannon => TurretStats {
            cost: 2500,
            health: 500.0,
            damage: 2500.0,
            cooldown: 180,
            range: 1100.0,
            payload: Payload::Direct,
            delivery: Delivery::Instant,
            projectile_speed: 0.0,
        },
        TurretKind::Healer => TurretStats {
            cost: 650,
            health: 120.0,
            damage: 20.0,
            cooldown: 480,
            range: 200.0,
            payload: Payload::Heal,
            delivery: Delivery::Homing,
            projectile_speed: 8.0,
        },
    }
}
