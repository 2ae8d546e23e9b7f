//! Movement system: advances hostiles along their lanes, resolves arrivals at
//! the core, and applies melee damage to turrets hostiles walk past.

use hecs::Entity;
use tracing::debug;

use obsidian_core::components::*;
use obsidian_core::constants::{CORE_RADIUS, HOSTILE_MELEE_RANGE, MELEE_DAMAGE_FACTOR};
use obsidian_core::enums::{HostileKind, TurretKind};
use obsidian_core::events::SimEvent;
use obsidian_core::types::{core_position, HostileId, TurretId, Vec2};
use obsidian_roster::route::Route;

use crate::session::Session;
use crate::store::EntityStore;

/// Run the movement phase for one tick.
pub fn run(
    store: &mut EntityStore,
    session: &mut Session,
    lanes: &[Route],
    events: &mut Vec<SimEvent>,
) {
    let arrivals = advance_hostiles(store, lanes);

    for (hostile_id, kind, contact_damage) in arrivals {
        store.despawn_hostile(hostile_id);
        let taken = session.core.damage(contact_damage);
        debug!(id = hostile_id.0, ?kind, taken, core = session.core.health, "hostile reached core");
        events.push(SimEvent::HostileReachedCore {
            hostile_id,
            kind,
            damage: taken,
        });
        events.push(SimEvent::CoreDamaged {
            amount: taken,
            remaining: session.core.health,
        });
    }

    melee_turrets(store, events);
}

/// Move every hostile one step. Returns the hostiles that arrived this tick.
fn advance_hostiles(store: &mut EntityStore, lanes: &[Route]) -> Vec<(HostileId, HostileKind, f32)> {
    let core = core_position();
    let mut arrivals = Vec::new();
    let mut recovered: Vec<Entity> = Vec::new();

    for (entity, (hostile, pos, progress, slowed)) in store.world_mut().query_mut::<(
        &Hostile,
        &mut Position,
        &mut PathProgress,
        Option<&mut Slowed>,
    )>() {
        let multiplier = match slowed {
            Some(slow) => {
                let m = slow.multiplier;
                slow.remaining_ticks = slow.remaining_ticks.saturating_sub(1);
                if slow.remaining_ticks == 0 {
                    recovered.push(entity);
                }
                m
            }
            None => 1.0,
        };
        let step = hostile.speed * multiplier;

        match lanes.get(progress.lane) {
            Some(route) => {
                progress.travelled = (progress.travelled + step).min(route.length());
                progress.remaining = route.remaining(progress.travelled);
                pos.0 = route.point_at(progress.travelled);
            }
            None => {
                // No lane: walk straight at the core.
                progress.travelled += step;
                pos.0 += (core - pos.0).normalize_or_zero() * step;
                progress.remaining = pos.0.distance(core);
            }
        }

        if pos.0.distance(core) <= CORE_RADIUS || progress.remaining <= 0.0 {
            arrivals.push((hostile.id, hostile.kind, hostile.contact_damage));
        }
    }

    for entity in recovered {
        let _ = store.world_mut().remove_one::<Slowed>(entity);
    }

    arrivals.sort_by_key(|&(id, _, _)| id);
    arrivals
}

/// Hostiles within melee range chip away at turrets. Destroyed turrets are removed
/// without refund.
fn melee_turrets(store: &mut EntityStore, events: &mut Vec<SimEvent>) {
    let attackers: Vec<(Vec2, f32)> = store
        .world()
        .query::<(&Hostile, &Position)>()
        .iter()
        .map(|(_, (hostile, pos))| (pos.0, hostile.contact_damage * MELEE_DAMAGE_FACTOR))
        .collect();
    if attackers.is_empty() {
        return;
    }

    let mut destroyed: Vec<(TurretId, TurretKind)> = Vec::new();
    for (_entity, (turret, pos, health)) in store
        .world_mut()
        .query_mut::<(&Turret, &Position, &mut Health)>()
    {
        let damage: f32 = attackers
            .iter()
            .filter(|(at, _)| at.distance(pos.0) <= HOSTILE_MELEE_RANGE)
            .map(|(_, dps)| dps)
            .sum();
        if damage <= 0.0 {
            continue;
        }
        health.current = (health.current - damage).max(0.0);
        if health.current <= 0.0 {
            destroyed.push((turret.id, turret.kind));
        }
    }

    destroyed.sort_by_key(|&(id, _)| id);
    for (turret_id, kind) in destroyed {
        store.despawn_turret(turret_id);
        debug!(id = turret_id.0, ?kind, "turret destroyed");
        events.push(SimEvent::TurretDestroyed { turret_id, kind });
    }
}
