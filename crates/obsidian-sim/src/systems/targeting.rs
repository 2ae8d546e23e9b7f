//! Targeting system: ticks turret cooldowns, picks targets and launches projectiles.

use tracing::trace;

use obsidian_core::components::*;
use obsidian_core::constants::CORE_RADIUS;
use obsidian_core::events::SimEvent;
use obsidian_core::types::{core_position, HostileId, Vec2};
use obsidian_roster::arsenal::get_stats;

use crate::economy;
use crate::session::Session;
use crate::store::EntityStore;
use crate::world_setup::{self, Launch};

/// A hostile that can be shot at this tick.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub id: HostileId,
    pub position: Vec2,
    /// Lane distance left to the core.
    pub remaining: f32,
}

/// Among candidates within `range` of `origin`, the one furthest along its lane.
/// Ties go to the lowest id.
pub fn select_target(origin: Vec2, range: f32, candidates: &[Candidate]) -> Option<Candidate> {
    candidates
        .iter()
        .filter(|c| c.position.distance(origin) <= range)
        .min_by(|a, b| a.remaining.total_cmp(&b.remaining).then(a.id.cmp(&b.id)))
        .copied()
}

/// Run the targeting phase for one tick.
pub fn run(store: &mut EntityStore, session: &Session, events: &mut Vec<SimEvent>) {
    let damage_mult = economy::damage_multiplier(session.upgrades.damage);
    let range_mult = economy::range_multiplier(session.upgrades.range);
    let core = core_position();
    let core_damaged = session.core.health < session.core.max;

    let candidates: Vec<Candidate> = store
        .world()
        .query::<(&Hostile, &Position, &PathProgress, Option<&Dying>)>()
        .iter()
        .filter(|(_, (_, _, _, dying))| dying.is_none())
        .map(|(_, (hostile, pos, progress, _))| Candidate {
            id: hostile.id,
            position: pos.0,
            remaining: progress.remaining,
        })
        .collect();

    let mut launches: Vec<Launch> = Vec::new();

    for (_entity, (turret, pos)) in store.world_mut().query_mut::<(&mut Turret, &Position)>() {
        if turret.cooldown > 0 {
            turret.cooldown -= 1;
            continue;
        }

        let stats = get_stats(turret.kind);
        let range = stats.range * range_mult;
        let amount = stats.damage * damage_mult;

        if turret.kind.is_support() {
            turret.target = None;
            if core_damaged && pos.0.distance(core) <= range + CORE_RADIUS {
                turret.cooldown = stats.cooldown;
                launches.push(Launch {
                    turret_id: turret.id,
                    source: turret.kind,
                    origin: pos.0,
                    target: ProjectileTarget::Core,
                    aim: core,
                    amount,
                });
            }
            continue;
        }

        match select_target(pos.0, range, &candidates) {
            Some(target) => {
                turret.target = Some(target.id);
                turret.cooldown = stats.cooldown;
                launches.push(Launch {
                    turret_id: turret.id,
                    source: turret.kind,
                    origin: pos.0,
                    target: ProjectileTarget::Hostile(target.id),
                    aim: target.position,
                    amount,
                });
            }
            None => turret.target = None,
        }
    }

    // Projectile ids follow turret id order.
    launches.sort_by_key(|launch| launch.turret_id);
    for launch in &launches {
        world_setup::spawn_projectile(store, launch);
        trace!(turret = launch.turret_id.0, target = ?launch.target, "fired");
        events.push(SimEvent::TurretFired {
            turret_id: launch.turret_id,
            kind: launch.source,
        });
    }
}
