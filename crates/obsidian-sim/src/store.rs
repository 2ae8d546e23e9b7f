//! Entity store: the hecs world plus id indexes for hostiles and turrets.
//!
//! Cross-tick references (turret targets, projectile targets, sell requests)
//! hold ids, never `hecs::Entity`. Every lookup goes through the index and is
//! re-checked against the world, so a stale id resolves to `None`.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use obsidian_core::components::{Dying, Hostile, Projectile};
use obsidian_core::types::{HostileId, ProjectileId, TurretId};

#[derive(Default)]
pub struct EntityStore {
    world: World,
    hostiles: BTreeMap<HostileId, Entity>,
    turrets: BTreeMap<TurretId, Entity>,
    next_hostile_id: u32,
    next_turret_id: u32,
    next_projectile_id: u32,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entity and restart id assignment.
    pub fn clear(&mut self) {
        self.world.clear();
        self.hostiles.clear();
        self.turrets.clear();
        self.next_hostile_id = 0;
        self.next_turret_id = 0;
        self.next_projectile_id = 0;
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    // --- Id assignment ---

    pub fn allocate_hostile_id(&mut self) -> HostileId {
        let id = HostileId(self.next_hostile_id);
        self.next_hostile_id += 1;
        id
    }

    pub fn allocate_turret_id(&mut self) -> TurretId {
        let id = TurretId(self.next_turret_id);
        self.next_turret_id += 1;
        id
    }

    pub fn allocate_projectile_id(&mut self) -> ProjectileId {
        let id = ProjectileId(self.next_projectile_id);
        self.next_projectile_id += 1;
        id
    }

    pub fn index_hostile(&mut self, id: HostileId, entity: Entity) {
        self.hostiles.insert(id, entity);
    }

    pub fn index_turret(&mut self, id: TurretId, entity: Entity) {
        self.turrets.insert(id, entity);
    }

    // --- Lookup ---

    /// Live entity for a hostile id, including hostiles already marked `Dying`.
    pub fn hostile(&self, id: HostileId) -> Option<Entity> {
        self.hostiles
            .get(&id)
            .copied()
            .filter(|&entity| self.world.contains(entity))
    }

    /// Live entity for a hostile that can still be hit.
    pub fn targetable_hostile(&self, id: HostileId) -> Option<Entity> {
        self.hostile(id)
            .filter(|&entity| self.world.get::<&Dying>(entity).is_err())
    }

    pub fn turret(&self, id: TurretId) -> Option<Entity> {
        self.turrets
            .get(&id)
            .copied()
            .filter(|&entity| self.world.contains(entity))
    }

    /// Turret ids in ascending order.
    pub fn turret_ids(&self) -> impl Iterator<Item = TurretId> + '_ {
        self.turrets.keys().copied()
    }

    pub fn hostile_count(&self) -> usize {
        self.hostiles.len()
    }

    pub fn turret_count(&self) -> usize {
        self.turrets.len()
    }

    pub fn projectile_count(&self) -> usize {
        self.world.query::<&Projectile>().iter().count()
    }

    /// Live hostiles tagged with `wave`.
    pub fn hostiles_in_wave(&self, wave: u8) -> u32 {
        self.world
            .query::<&Hostile>()
            .iter()
            .filter(|(_, hostile)| hostile.wave == wave)
            .count() as u32
    }

    // --- Removal ---

    pub fn despawn_hostile(&mut self, id: HostileId) {
        if let Some(entity) = self.hostiles.remove(&id) {
            let _ = self.world.despawn(entity);
        }
    }

    pub fn despawn_turret(&mut self, id: TurretId) {
        if let Some(entity) = self.turrets.remove(&id) {
            let _ = self.world.despawn(entity);
        }
    }

    /// Despawn an unindexed entity (projectiles).
    pub fn despawn(&mut self, entity: Entity) {
        let _ = self.world.despawn(entity);
    }
}
