//! Collision system: moves projectiles, detects contact and applies payloads.
//!
//! Hostiles whose health reaches zero are tagged `Dying` and stop being valid
//! targets immediately. Crediting and removal happen in the rewards phase.

use hecs::Entity;
use tracing::trace;

use obsidian_core::components::*;
use obsidian_core::constants::{PROJECTILE_BOUNDS_MARGIN, PROJECTILE_HIT_THRESHOLD, PROJECTILE_MAX_LIFETIME_TICKS};
use obsidian_core::enums::Delivery;
use obsidian_core::events::SimEvent;
use obsidian_core::types::{core_position, Bounds, HostileId, Vec2};

use crate::session::Session;
use crate::store::EntityStore;

/// Run the collision phase for one tick.
pub fn run(
    store: &mut EntityStore,
    session: &mut Session,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    let field = Bounds::playfield();

    let mut projectiles: Vec<(Entity, Projectile, Vec2)> = store
        .world()
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(entity, (projectile, pos))| (entity, projectile.clone(), pos.0))
        .collect();
    projectiles.sort_by_key(|(_, projectile, _)| projectile.id);

    for (entity, mut projectile, mut pos) in projectiles {
        projectile.age += 1;

        let live_target = match projectile.target {
            ProjectileTarget::Core => Some(core_position()),
            ProjectileTarget::Hostile(id) => targetable_position(store, id),
        };
        match live_target {
            Some(at) => projectile.last_known = at,
            // Splash still lands where the target was; everything else fizzles.
            None if matches!(projectile.payload, Payload::Splash { .. }) => {}
            None => {
                despawn_buffer.push(entity);
                continue;
            }
        }

        let aim = projectile.last_known;
        let hit = match projectile.delivery {
            Delivery::Instant => true,
            Delivery::Homing => {
                let to_aim = aim - pos;
                let distance = to_aim.length();
                if distance <= PROJECTILE_HIT_THRESHOLD.max(projectile.speed) {
                    true
                } else {
                    pos += to_aim / distance * projectile.speed;
                    false
                }
            }
        };

        if hit {
            apply_impact(store, session, &projectile, aim, events);
            despawn_buffer.push(entity);
            continue;
        }

        if projectile.age >= PROJECTILE_MAX_LIFETIME_TICKS
            || !field.contains_with_margin(pos, PROJECTILE_BOUNDS_MARGIN)
        {
            despawn_buffer.push(entity);
            continue;
        }

        let world = store.world_mut();
        if let Ok(mut stored) = world.get::<&mut Projectile>(entity) {
            *stored = projectile;
        }
        if let Ok(mut stored) = world.get::<&mut Position>(entity) {
            stored.0 = pos;
        }
    }

    for entity in despawn_buffer.drain(..) {
        store.despawn(entity);
    }
}

/// Position of a hostile that can still take damage.
fn targetable_position(store: &EntityStore, id: HostileId) -> Option<Vec2> {
    let entity = store.targetable_hostile(id)?;
    store.world().get::<&Position>(entity).ok().map(|pos| pos.0)
}

fn apply_impact(
    store: &mut EntityStore,
    session: &mut Session,
    projectile: &Projectile,
    at: Vec2,
    events: &mut Vec<SimEvent>,
) {
    match (projectile.payload, projectile.target) {
        (Payload::Heal, _) | (_, ProjectileTarget::Core) => {
            let restored = session.core.heal(projectile.amount);
            if restored > 0.0 {
                events.push(SimEvent::CoreHealed {
                    amount: restored,
                    current: session.core.health,
                });
            }
        }
        (Payload::Direct, ProjectileTarget::Hostile(id)) => {
            if let Some(entity) = store.targetable_hostile(id) {
                damage_hostile(store, entity, projectile.amount);
            }
        }
        (
            Payload::Slow {
                multiplier,
                duration_ticks,
            },
            ProjectileTarget::Hostile(id),
        ) => {
            if let Some(entity) = store.targetable_hostile(id) {
                if !damage_hostile(store, entity, projectile.amount) {
                    apply_slow(store, entity, multiplier, duration_ticks);
                }
            }
        }
        (Payload::Splash { radius }, ProjectileTarget::Hostile(_)) => {
            let caught: Vec<Entity> = store
                .world()
                .query::<(&Hostile, &Position, Option<&Dying>)>()
                .iter()
                .filter(|(_, (_, pos, dying))| dying.is_none() && pos.0.distance(at) <= radius)
                .map(|(entity, _)| entity)
                .collect();
            trace!(caught = caught.len(), "splash");
            for entity in caught {
                damage_hostile(store, entity, projectile.amount);
            }
        }
    }
}

/// Subtract health, clamping at zero. Returns true if this killed the hostile.
pub fn damage_hostile(store: &mut EntityStore, entity: Entity, amount: f32) -> bool {
    let world = store.world_mut();
    let killed = match world.get::<&mut Health>(entity) {
        Ok(mut health) => {
            health.current = (health.current - amount).max(0.0);
            health.current <= 0.0
        }
        Err(_) => false,
    };
    if killed {
        let _ = world.insert_one(entity, Dying);
    }
    killed
}

/// Slow a hostile. Overlapping slows keep the stronger multiplier and the longer duration.
fn apply_slow(store: &mut EntityStore, entity: Entity, multiplier: f32, duration_ticks: u32) {
    let world = store.world_mut();
    if let Ok(mut slowed) = world.get::<&mut Slowed>(entity) {
        slowed.multiplier = slowed.multiplier.min(multiplier);
        slowed.remaining_ticks = slowed.remaining_ticks.max(duration_ticks);
        return;
    }
    let _ = world.insert_one(
        entity,
        Slowed {
            multiplier,
            remaining_ticks: duration_ticks,
        },
    );
}
