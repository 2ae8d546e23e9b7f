//! Player commands sent from a front end to the simulation.
//!
//! Queued commands are applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::types::TurretId;

/// Initial session values applied by `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartConfig {
    pub credits: u32,
    pub core_health: f32,
    pub max_core_health: f32,
    pub wave: u8,
}

impl Default for StartConfig {
    fn default() -> Self {
        Self {
            credits: STARTING_CREDITS,
            core_health: STARTING_CORE_HEALTH,
            max_core_health: STARTING_CORE_HEALTH,
            wave: STARTING_WAVE,
        }
    }
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session ---
    /// Reset and begin a session. Valid from Idle or a terminal phase.
    Start {
        #[serde(default)]
        config: StartConfig,
    },

    // --- Build ---
    PlaceTurret { kind: TurretKind, x: f32, y: f32 },
    SellTurret { turret_id: TurretId },

    // --- Shop ---
    PurchaseUpgrade { category: UpgradeCategory },
    RepairCore,
}
