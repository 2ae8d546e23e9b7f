//! Per-kind hostile parameters.

use obsidian_core::enums::HostileKind;

/// Stats a hostile is spawned with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostileProfile {
    pub health: f32,
    /// Playfield units per tick.
    pub speed: f32,
    /// Credits on kill, before the economy multiplier.
    pub reward: u32,
    /// Core damage on arrival. Also scales melee damage against turrets.
    pub contact_damage: f32,
    /// Whether this kind periodically summons minions.
    pub summons: bool,
}

/// Get the profile for a given kind.
pub fn get_profile(kind: HostileKind) -> HostileProfile {
    let (health, speed, reward, contact_damage) = match kind {
        HostileKind::Grunt => (100.0, 1.2, 10, 5.0),
        HostileKind::Swordsman => (220.0, 1.0, 18, 8.0),
        HostileKind::Heavy => (900.0, 0.55, 45, 20.0),
        HostileKind::Necromancer => (600.0, 0.7, 60, 15.0),
        HostileKind::NecromancerMinion => (60.0, 1.6, 3, 3.0),
        HostileKind::Berserker => (1400.0, 0.9, 70, 25.0),
        HostileKind::OverseerProtector => (5000.0, 0.6, 150, 30.0),
        HostileKind::Loyalist => (30_000.0, 0.35, 1500, 60.0),
        HostileKind::OriginEnforcer => (60_000.0, 0.3, 2500, 80.0),
        HostileKind::Commander => (120_000.0, 0.28, 4000, 100.0),
        HostileKind::King => (400_000.0, 0.22, 10_000, 100.0),
    };

    HostileProfile {
        health,
        speed,
        reward,
        contact_damage,
        summons: kind == HostileKind::Necromancer,
    }
}
