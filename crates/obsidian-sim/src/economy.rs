//! Economy and upgrade math.
//!
//! Effective turret stats are always derived from base stats and the current
//! upgrade levels, never stored. `upgrade_cost` is the single source for both
//! the shop display and the amount charged.

use obsidian_core::constants::*;
use obsidian_core::enums::{CommandRank, UpgradeCategory};
use obsidian_core::state::RankView;

/// Guards floors against values like 1295.9999999 from float powers.
const FLOOR_EPSILON: f64 = 1e-6;

pub fn upgrade_base_cost(category: UpgradeCategory) -> u32 {
    match category {
        UpgradeCategory::Damage => DAMAGE_UPGRADE_BASE_COST,
        UpgradeCategory::Range => RANGE_UPGRADE_BASE_COST,
        UpgradeCategory::Core => CORE_UPGRADE_BASE_COST,
        UpgradeCategory::Economy => ECONOMY_UPGRADE_BASE_COST,
    }
}

/// Cost to buy the level after `level`. `None` once the track is maxed.
pub fn upgrade_cost(category: UpgradeCategory, level: u8) -> Option<u32> {
    if level >= UPGRADE_MAX_LEVEL {
        return None;
    }
    let base = f64::from(upgrade_base_cost(category));
    let cost = base * UPGRADE_COST_GROWTH.powi(i32::from(level));
    Some((cost + FLOOR_EPSILON).floor() as u32)
}

pub fn damage_multiplier(level: u8) -> f32 {
    1.0 + DAMAGE_PER_LEVEL * f32::from(level)
}

pub fn range_multiplier(level: u8) -> f32 {
    1.0 + RANGE_PER_LEVEL * f32::from(level)
}

pub fn reward_multiplier(level: u8) -> f64 {
    1.0 + f64::from(REWARD_PER_LEVEL) * f64::from(level)
}

/// Credits actually granted for a kill.
pub fn credited_reward(base_reward: u32, economy_level: u8) -> u32 {
    (f64::from(base_reward) * reward_multiplier(economy_level) + FLOOR_EPSILON).floor() as u32
}

/// Credits returned when selling a turret that cost `cost`.
pub fn sell_refund(cost: u32, ratio: f32) -> u32 {
    (f64::from(cost) * f64::from(ratio.clamp(0.0, 1.0)) + FLOOR_EPSILON).floor() as u32
}

/// Rank for a total number of purchased levels.
pub fn rank_for(total_levels: u32) -> RankView {
    let (rank, floor, ceiling) = if total_levels >= RANK_COMMANDER_LEVELS {
        (CommandRank::Commander, RANK_COMMANDER_LEVELS, None)
    } else if total_levels >= RANK_CAPTAIN_LEVELS {
        (
            CommandRank::Captain,
            RANK_CAPTAIN_LEVELS,
            Some(RANK_COMMANDER_LEVELS),
        )
    } else {
        (CommandRank::Leader, 0, Some(RANK_CAPTAIN_LEVELS))
    };

    let progress_percent = match ceiling {
        Some(ceiling) => (total_levels - floor) * 100 / (ceiling - floor),
        None => 100,
    };

    RankView {
        rank,
        title: rank.title().to_string(),
        total_levels,
        progress_percent,
    }
}
