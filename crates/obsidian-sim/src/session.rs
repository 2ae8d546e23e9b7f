//! Per-session state owned by the engine and handed to each phase.

use obsidian_core::commands::StartConfig;
use obsidian_core::constants::FINAL_WAVE;
use obsidian_core::state::UpgradeLevels;

use crate::systems::wave_spawner::WaveState;

/// Core health. `health` stays within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreState {
    pub health: f32,
    pub max: f32,
}

impl CoreState {
    /// Apply damage, clamping at zero. Returns the damage actually taken.
    pub fn damage(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health - amount.max(0.0)).max(0.0);
        before - self.health
    }

    /// Restore health, clamping at max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health + amount.max(0.0)).min(self.max);
        self.health - before
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }
}

/// Everything about a session that is not an entity.
#[derive(Debug, Clone)]
pub struct Session {
    pub credits: u32,
    pub core: CoreState,
    pub upgrades: UpgradeLevels,
    pub wave: WaveState,
}

impl Session {
    /// Fresh session from start values. Out-of-range values are clamped.
    pub fn from_config(config: &StartConfig) -> Self {
        let max = config.max_core_health.max(1.0);
        Self {
            credits: config.credits,
            core: CoreState {
                health: config.core_health.clamp(0.0, max),
                max,
            },
            upgrades: UpgradeLevels::default(),
            wave: WaveState::begin(config.wave.clamp(1, FINAL_WAVE), 0),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::from_config(&StartConfig::default())
    }
}
