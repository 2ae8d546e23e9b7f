//! Session snapshot: the complete visible state published after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{HostileId, ProjectileId, SimTime, TurretId, Vec2};

/// Purchased level per upgrade track, each in `0..=UPGRADE_MAX_LEVEL`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub damage: u8,
    pub range: u8,
    pub core: u8,
    pub economy: u8,
}

impl UpgradeLevels {
    pub fn get(&self, category: UpgradeCategory) -> u8 {
        match category {
            UpgradeCategory::Damage => self.damage,
            UpgradeCategory::Range => self.range,
            UpgradeCategory::Core => self.core,
            UpgradeCategory::Economy => self.economy,
        }
    }

    pub fn get_mut(&mut self, category: UpgradeCategory) -> &mut u8 {
        match category {
            UpgradeCategory::Damage => &mut self.damage,
            UpgradeCategory::Range => &mut self.range,
            UpgradeCategory::Core => &mut self.core,
            UpgradeCategory::Economy => &mut self.economy,
        }
    }

    /// Sum of all levels.
    pub fn total(&self) -> u32 {
        UpgradeCategory::ALL
            .iter()
            .map(|&category| u32::from(self.get(category)))
            .sum()
    }
}

/// Complete session state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub core_health: f32,
    pub max_core_health: f32,
    pub credits: u32,
    pub wave: u8,
    /// Not yet spawned plus still alive in the current wave.
    pub hostiles_remaining_in_wave: u32,
    /// Placed turrets.
    pub live_unit_count: u32,
    pub max_unit_count: u32,
    pub upgrades: Vec<UpgradeView>,
    pub rank: RankView,
    pub hostiles: Vec<HostileView>,
    pub turrets: Vec<TurretView>,
    pub projectiles: Vec<ProjectileView>,
    /// Events raised during this tick.
    pub events: Vec<SimEvent>,
}

/// One upgrade track as shown in the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeView {
    pub category: UpgradeCategory,
    pub level: u8,
    /// `None` once the track is maxed. Same value a purchase would charge.
    pub next_cost: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankView {
    pub rank: CommandRank,
    pub title: String,
    pub total_levels: u32,
    /// Progress toward the next rank, 0-100. Stays at 100 at the top rank.
    pub progress_percent: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileView {
    pub id: HostileId,
    pub kind: HostileKind,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub remaining_distance: f32,
    pub slowed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretView {
    pub id: TurretId,
    pub kind: TurretKind,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub cooldown: u32,
    pub target: Option<HostileId>,
    pub effective_damage: f32,
    pub effective_range: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub source: TurretKind,
    pub position: Vec2,
}
