//! Entity spawn factories.
//!
//! Each factory validates nothing: callers check placement and credits first,
//! so the store never holds a half-built entity.

use glam::Vec2;

use obsidian_core::components::*;
use obsidian_core::constants::NECROMANCER_SUMMON_INTERVAL_TICKS;
use obsidian_core::enums::{HostileKind, TurretKind};
use obsidian_core::types::{HostileId, TurretId};
use obsidian_roster::arsenal::get_stats;
use obsidian_roster::profiles::get_profile;
use obsidian_roster::route::Route;

use crate::store::EntityStore;

/// Spawn a hostile `travelled` units along `route` (lane index `lane`).
pub fn spawn_hostile(
    store: &mut EntityStore,
    kind: HostileKind,
    wave: u8,
    lane: usize,
    route: &Route,
    travelled: f32,
) -> HostileId {
    let profile = get_profile(kind);
    let id = store.allocate_hostile_id();
    let travelled = travelled.clamp(0.0, route.length());

    let entity = store.world_mut().spawn((
        Hostile {
            id,
            kind,
            wave,
            speed: profile.speed,
            reward: profile.reward,
            contact_damage: profile.contact_damage,
        },
        Position(route.point_at(travelled)),
        Health {
            current: profile.health,
            max: profile.health,
        },
        PathProgress {
            lane,
            travelled,
            remaining: route.remaining(travelled),
        },
    ));

    if profile.summons {
        let _ = store.world_mut().insert_one(
            entity,
            Summoner {
                ticks_until_summon: NECROMANCER_SUMMON_INTERVAL_TICKS,
            },
        );
    }

    store.index_hostile(id, entity);
    id
}

/// Spawn a turret with full health and a ready weapon.
pub fn spawn_turret(store: &mut EntityStore, kind: TurretKind, position: Vec2) -> TurretId {
    let stats = get_stats(kind);
    let id = store.allocate_turret_id();

    let entity = store.world_mut().spawn((
        Turret {
            id,
            kind,
            cooldown: 0,
            target: None,
        },
        Position(position),
        Health {
            current: stats.health,
            max: stats.health,
        },
    ));

    store.index_turret(id, entity);
    id
}

/// A shot decided by the targeting phase.
#[derive(Debug, Clone)]
pub struct Launch {
    pub turret_id: TurretId,
    pub source: TurretKind,
    pub origin: Vec2,
    pub target: ProjectileTarget,
    pub aim: Vec2,
    pub amount: f32,
}

/// Spawn the projectile for a launch, using the source kind's weapon behavior.
pub fn spawn_projectile(store: &mut EntityStore, launch: &Launch) {
    let stats = get_stats(launch.source);
    let id = store.allocate_projectile_id();

    store.world_mut().spawn((
        Projectile {
            id,
            source: launch.source,
            amount: launch.amount,
            payload: stats.payload,
            delivery: stats.delivery,
            target: launch.target,
            last_known: launch.aim,
            speed: stats.projectile_speed,
            age: 0,
        },
        Position(launch.origin),
    ));
}
