//! Scripted defense used by the headless runner.
//!
//! Reads a snapshot and answers with at most one command: repair a badly
//! damaged core, fill the next empty slot of a fixed build order, or buy the
//! cheapest upgrade once every slot is manned.

use obsidian_core::commands::PlayerCommand;
use obsidian_core::constants::{REPAIR_COST, TURRET_FOOTPRINT_RADIUS};
use obsidian_core::enums::{SessionPhase, TurretKind};
use obsidian_core::state::SimSnapshot;
use obsidian_core::types::Vec2;
use obsidian_sim::roster::arsenal::get_stats;

/// Repair once core health drops below this fraction of max.
const REPAIR_THRESHOLD: f32 = 0.5;

/// Slots covering the bends of all four lanes, cheapest first.
const BUILD_ORDER: [(TurretKind, f32, f32); 12] = [
    (TurretKind::Sentry, 500.0, 450.0),
    (TurretKind::Sentry, 1300.0, 750.0),
    (TurretKind::Sentry, 1050.0, 300.0),
    (TurretKind::Sentry, 750.0, 900.0),
    (TurretKind::Blaster, 520.0, 540.0),
    (TurretKind::Blaster, 1280.0, 660.0),
    (TurretKind::Shocker, 960.0, 380.0),
    (TurretKind::Shocker, 840.0, 820.0),
    (TurretKind::Repeater, 700.0, 420.0),
    (TurretKind::Repeater, 1100.0, 780.0),
    (TurretKind::Healer, 780.0, 700.0),
    (TurretKind::Cannon, 1000.0, 480.0),
];

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Commands issued so far.
    pub issued: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next command for the session in `snapshot`, if any.
    pub fn decide(&mut self, snapshot: &SimSnapshot) -> Option<PlayerCommand> {
        if snapshot.phase != SessionPhase::Running {
            return None;
        }

        let command = self
            .repair(snapshot)
            .or_else(|| self.build(snapshot))
            .or_else(|| self.upgrade(snapshot))?;
        self.issued += 1;
        Some(command)
    }

    fn repair(&self, snapshot: &SimSnapshot) -> Option<PlayerCommand> {
        let low = snapshot.core_health < snapshot.max_core_health * REPAIR_THRESHOLD;
        (low && snapshot.credits >= REPAIR_COST).then_some(PlayerCommand::RepairCore)
    }

    fn build(&self, snapshot: &SimSnapshot) -> Option<PlayerCommand> {
        if snapshot.live_unit_count >= snapshot.max_unit_count {
            return None;
        }
        let (kind, x, y) = next_empty_slot(snapshot)?;
        (snapshot.credits >= get_stats(kind).cost).then_some(PlayerCommand::PlaceTurret { kind, x, y })
    }

    fn upgrade(&self, snapshot: &SimSnapshot) -> Option<PlayerCommand> {
        // Hold credits for rebuilding until every slot is manned.
        if next_empty_slot(snapshot).is_some() {
            return None;
        }
        snapshot
            .upgrades
            .iter()
            .filter_map(|view| view.next_cost.map(|cost| (cost, view.category)))
            .filter(|&(cost, _)| cost <= snapshot.credits)
            .min_by_key(|&(cost, _)| cost)
            .map(|(_, category)| PlayerCommand::PurchaseUpgrade { category })
    }
}

/// First build-order slot with no turret standing on it.
fn next_empty_slot(snapshot: &SimSnapshot) -> Option<(TurretKind, f32, f32)> {
    BUILD_ORDER.iter().copied().find(|&(_, x, y)| {
        let slot = Vec2::new(x, y);
        !snapshot
            .turrets
            .iter()
            .any(|turret| turret.position.distance(slot) < TURRET_FOOTPRINT_RADIUS * 2.0)
    })
}
