//! Snapshot system: reads the store and session into a `SimSnapshot`.
//!
//! This system is read-only. It never modifies the world.

use obsidian_core::components::*;
use obsidian_core::enums::{SessionPhase, UpgradeCategory};
use obsidian_core::events::SimEvent;
use obsidian_core::state::*;
use obsidian_core::types::SimTime;
use obsidian_roster::arsenal::get_stats;

use crate::economy;
use crate::session::Session;
use crate::store::EntityStore;
use crate::systems::wave_spawner;

/// Build a complete snapshot from the current session.
pub fn build_snapshot(
    store: &EntityStore,
    session: &Session,
    time: &SimTime,
    phase: SessionPhase,
    max_units: u32,
    events: Vec<SimEvent>,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        phase,
        core_health: session.core.health,
        max_core_health: session.core.max,
        credits: session.credits,
        wave: session.wave.number(),
        hostiles_remaining_in_wave: wave_spawner::remaining_in_wave(store, &session.wave),
        live_unit_count: store.turret_count() as u32,
        max_unit_count: max_units,
        upgrades: build_upgrades(&session.upgrades),
        rank: economy::rank_for(session.upgrades.total()),
        hostiles: build_hostiles(store),
        turrets: build_turrets(store, &session.upgrades),
        projectiles: build_projectiles(store),
        events,
    }
}

fn build_upgrades(levels: &UpgradeLevels) -> Vec<UpgradeView> {
    UpgradeCategory::ALL
        .iter()
        .map(|&category| {
            let level = levels.get(category);
            UpgradeView {
                category,
                level,
                next_cost: economy::upgrade_cost(category, level),
            }
        })
        .collect()
}

fn build_hostiles(store: &EntityStore) -> Vec<HostileView> {
    let mut hostiles: Vec<HostileView> = store
        .world()
        .query::<(&Hostile, &Position, &Health, &PathProgress, Option<&Slowed>)>()
        .iter()
        .map(|(_, (hostile, pos, health, progress, slowed))| HostileView {
            id: hostile.id,
            kind: hostile.kind,
            position: pos.0,
            health: health.current,
            max_health: health.max,
            remaining_distance: progress.remaining,
            slowed: slowed.is_some(),
        })
        .collect();
    hostiles.sort_by_key(|h| h.id);
    hostiles
}

fn build_turrets(store: &EntityStore, levels: &UpgradeLevels) -> Vec<TurretView> {
    let damage_mult = economy::damage_multiplier(levels.damage);
    let range_mult = economy::range_multiplier(levels.range);

    let mut turrets: Vec<TurretView> = store
        .world()
        .query::<(&Turret, &Position, &Health)>()
        .iter()
        .map(|(_, (turret, pos, health))| {
            let stats = get_stats(turret.kind);
            TurretView {
                id: turret.id,
                kind: turret.kind,
                position: pos.0,
                health: health.current,
                max_health: health.max,
                cooldown: turret.cooldown,
                target: turret.target,
                effective_damage: stats.damage * damage_mult,
                effective_range: stats.range * range_mult,
            }
        })
        .collect();
    turrets.sort_by_key(|t| t.id);
    turrets
}

fn build_projectiles(store: &EntityStore) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = store
        .world()
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(_, (projectile, pos))| ProjectileView {
            id: projectile.id,
            source: projectile.source,
            position: pos.0,
        })
        .collect();
    projectiles.sort_by_key(|p| p.id);
    projectiles
}
