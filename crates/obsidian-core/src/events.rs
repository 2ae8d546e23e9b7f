//! Events emitted by the simulation for narrative, audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{HostileId, TurretId};

/// Something that happened during a tick. Drained into that tick's snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    // --- Waves ---
    WaveStarted { wave: u8, hostile_count: u32 },
    /// Dialogue hook. Emitted once on the first tick of a scripted wave.
    NarrativeCue {
        wave: u8,
        speaker: Speaker,
        /// Whether the speaker's identity is known to the player yet.
        revealed: bool,
    },
    WaveCompleted { wave: u8 },

    // --- Hostiles ---
    HostileSpawned {
        hostile_id: HostileId,
        kind: HostileKind,
        wave: u8,
    },
    HostileKilled {
        hostile_id: HostileId,
        kind: HostileKind,
        reward: u32,
    },
    HostileReachedCore {
        hostile_id: HostileId,
        kind: HostileKind,
        damage: f32,
    },

    // --- Turrets ---
    TurretPlaced {
        turret_id: TurretId,
        kind: TurretKind,
        cost: u32,
    },
    TurretSold {
        turret_id: TurretId,
        kind: TurretKind,
        refund: u32,
    },
    TurretDestroyed { turret_id: TurretId, kind: TurretKind },
    TurretFired { turret_id: TurretId, kind: TurretKind },

    // --- Core and shop ---
    CoreDamaged { amount: f32, remaining: f32 },
    CoreHealed { amount: f32, current: f32 },
    CoreRepaired { amount: f32, cost: u32 },
    UpgradePurchased {
        category: UpgradeCategory,
        level: u8,
        cost: u32,
    },

    // --- Outcome ---
    Victory { wave: u8 },
    Defeat { wave: u8 },
}
