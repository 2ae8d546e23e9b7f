//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the entity store and all session state, applies
//! player actions, runs the phase systems once per tick and produces
//! `SimSnapshot`s. Completely headless, so sessions are deterministic for a
//! given seed and command sequence.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use obsidian_core::commands::{PlayerCommand, StartConfig};
use obsidian_core::components::{Position, Turret};
use obsidian_core::constants::*;
use obsidian_core::enums::{SessionPhase, TurretKind, UpgradeCategory};
use obsidian_core::errors::{PlacementError, RepairError, SellError, UpgradeError};
use obsidian_core::events::SimEvent;
use obsidian_core::state::SimSnapshot;
use obsidian_core::types::{core_position, Bounds, SimTime, TurretId};
use obsidian_roster::arsenal::get_stats;
use obsidian_roster::route::{default_lanes, Route};

use crate::economy;
use crate::session::Session;
use crate::store::EntityStore;
use crate::systems;
use crate::systems::wave_spawner::{self, WaveState};
use crate::world_setup;

/// Engine-wide settings. Fixed for the engine's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and commands = same session.
    pub seed: u64,
    /// Ticks between a wave's completion and the next wave's first spawn.
    pub inter_wave_pause_ticks: u32,
    /// Maximum number of placed turrets.
    pub max_units: u32,
    /// Fraction of a turret's cost refunded on sale.
    pub sell_refund_ratio: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            inter_wave_pause_ticks: INTER_WAVE_PAUSE_TICKS,
            max_units: MAX_UNITS,
            sell_refund_ratio: SELL_REFUND_RATIO,
        }
    }
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    config: SimConfig,
    store: EntityStore,
    lanes: Vec<Route>,
    session: Session,
    time: SimTime,
    phase: SessionPhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create an idle engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            store: EntityStore::new(),
            lanes: default_lanes(),
            session: Session::default(),
            time: SimTime::default(),
            phase: SessionPhase::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Reset everything and begin a session. Valid from any phase.
    pub fn start(&mut self, start: StartConfig) {
        self.store.clear();
        self.session = Session::from_config(&start);
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.time = SimTime::default();
        self.events.clear();
        self.phase = SessionPhase::Running;
        info!(
            seed = self.config.seed,
            credits = self.session.credits,
            wave = self.session.wave.number(),
            "session started"
        );
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    /// Outside `Running` this only applies queued commands.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();

        if self.phase == SessionPhase::Running {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Current state without advancing or draining events.
    pub fn snapshot(&self) -> SimSnapshot {
        self.build_snapshot(Vec::new())
    }

    // --- Player actions ---

    /// Place a turret, debiting its cost.
    pub fn place_turret(&mut self, kind: TurretKind, position: Vec2) -> Result<TurretId, PlacementError> {
        if self.phase != SessionPhase::Running {
            return Err(PlacementError::NotRunning);
        }
        if !Bounds::playfield().contains(position) {
            return Err(PlacementError::OutOfBounds);
        }
        if position.distance(core_position()) < CORE_RADIUS + TURRET_FOOTPRINT_RADIUS {
            return Err(PlacementError::InsideCore);
        }
        if let Some(other) = self.turret_near(position) {
            return Err(PlacementError::Occupied(other));
        }
        if self.store.turret_count() as u32 >= self.config.max_units {
            return Err(PlacementError::UnitCapReached {
                cap: self.config.max_units,
            });
        }
        let cost = get_stats(kind).cost;
        if self.session.credits < cost {
            return Err(PlacementError::InsufficientCredits {
                cost,
                available: self.session.credits,
            });
        }

        self.session.credits -= cost;
        let turret_id = world_setup::spawn_turret(&mut self.store, kind, position);
        debug!(id = turret_id.0, ?kind, x = position.x, y = position.y, cost, "turret placed");
        self.events.push(SimEvent::TurretPlaced { turret_id, kind, cost });
        Ok(turret_id)
    }

    /// Sell a turret. Returns the refund credited.
    pub fn sell_turret(&mut self, turret_id: TurretId) -> Result<u32, SellError> {
        if self.phase != SessionPhase::Running {
            return Err(SellError::NotRunning);
        }
        let entity = self
            .store
            .turret(turret_id)
            .ok_or(SellError::UnknownTurret(turret_id))?;
        let kind = self
            .store
            .world()
            .get::<&Turret>(entity)
            .map(|turret| turret.kind)
            .map_err(|_| SellError::UnknownTurret(turret_id))?;

        let refund = economy::sell_refund(get_stats(kind).cost, self.config.sell_refund_ratio);
        self.store.despawn_turret(turret_id);
        self.session.credits = self.session.credits.saturating_add(refund);
        debug!(id = turret_id.0, ?kind, refund, "turret sold");
        self.events.push(SimEvent::TurretSold {
            turret_id,
            kind,
            refund,
        });
        Ok(refund)
    }

    /// Buy the next level of an upgrade track. Returns the credits charged.
    pub fn purchase_upgrade(&mut self, category: UpgradeCategory) -> Result<u32, UpgradeError> {
        if self.phase != SessionPhase::Running {
            return Err(UpgradeError::NotRunning);
        }
        let level = self.session.upgrades.get(category);
        let cost = economy::upgrade_cost(category, level).ok_or(UpgradeError::MaxLevel(category))?;
        if self.session.credits < cost {
            return Err(UpgradeError::InsufficientCredits {
                cost,
                available: self.session.credits,
            });
        }

        self.session.credits -= cost;
        let level = {
            let slot = self.session.upgrades.get_mut(category);
            *slot += 1;
            *slot
        };
        if category == UpgradeCategory::Core {
            self.session.core.max += CORE_HEALTH_PER_LEVEL;
            self.session.core.health += CORE_HEALTH_PER_LEVEL;
        }

        debug!(category = category.as_str(), level, cost, "upgrade purchased");
        self.events.push(SimEvent::UpgradePurchased {
            category,
            level,
            cost,
        });
        Ok(cost)
    }

    /// Pay for a fixed core repair. Returns the health restored.
    pub fn repair_core(&mut self) -> Result<f32, RepairError> {
        if self.phase != SessionPhase::Running {
            return Err(RepairError::NotRunning);
        }
        if self.session.core.health >= self.session.core.max {
            return Err(RepairError::AlreadyFull);
        }
        if self.session.credits < REPAIR_COST {
            return Err(RepairError::InsufficientCredits {
                cost: REPAIR_COST,
                available: self.session.credits,
            });
        }

        self.session.credits -= REPAIR_COST;
        let restored = self.session.core.heal(REPAIR_AMOUNT);
        debug!(restored, core = self.session.core.health, "core repaired");
        self.events.push(SimEvent::CoreRepaired {
            amount: restored,
            cost: REPAIR_COST,
        });
        Ok(restored)
    }

    // --- Accessors ---

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn lanes(&self) -> &[Route] {
        &self.lanes
    }

    /// Spawn a hostile partway along a lane, bypassing the scheduler (for tests).
    #[cfg(test)]
    pub fn spawn_test_hostile(
        &mut self,
        kind: obsidian_core::enums::HostileKind,
        lane: usize,
        travelled: f32,
    ) -> obsidian_core::types::HostileId {
        let wave = self.session.wave.number();
        let route = self.lanes[lane].clone();
        world_setup::spawn_hostile(&mut self.store, kind, wave, lane, &route, travelled)
    }

    /// Mutable session access (for tests).
    #[cfg(test)]
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Mutable store access (for tests).
    #[cfg(test)]
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Rejections are logged and dropped.
    fn handle_command(&mut self, command: PlayerCommand) {
        let outcome = match command {
            PlayerCommand::Start { config } => {
                self.start(config);
                Ok(())
            }
            PlayerCommand::PlaceTurret { kind, x, y } => self
                .place_turret(kind, Vec2::new(x, y))
                .map(|_| ())
                .map_err(|e| e.to_string()),
            PlayerCommand::SellTurret { turret_id } => self
                .sell_turret(turret_id)
                .map(|_| ())
                .map_err(|e| e.to_string()),
            PlayerCommand::PurchaseUpgrade { category } => self
                .purchase_upgrade(category)
                .map(|_| ())
                .map_err(|e| e.to_string()),
            PlayerCommand::RepairCore => self
                .repair_core()
                .map(|_| ())
                .map_err(|e| e.to_string()),
        };

        if let Err(reason) = outcome {
            debug!(%reason, "command rejected");
        }
    }

    /// Run all phases in order.
    fn run_systems(&mut self) {
        // 1. Wave scheduling and summons
        systems::wave_spawner::run(
            &mut self.store,
            &mut self.session.wave,
            &self.lanes,
            &mut self.rng,
            &mut self.events,
        );
        // 2. Movement, arrivals, melee
        systems::movement::run(&mut self.store, &mut self.session, &self.lanes, &mut self.events);
        // 3. Targeting and firing
        systems::targeting::run(&mut self.store, &self.session, &mut self.events);
        // 4. Projectiles and damage
        systems::collision::run(
            &mut self.store,
            &mut self.session,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 5. Rewards and removal of the dead
        systems::rewards::run(&mut self.store, &mut self.session, &mut self.events);
        // 6. Wave completion and outcome
        self.resolve_outcome();
    }

    /// Defeat wins over victory when both happen in the same tick.
    fn resolve_outcome(&mut self) {
        let wave = self.session.wave.number();

        if self.session.core.is_destroyed() {
            self.phase = SessionPhase::Defeat;
            info!(wave, tick = self.time.tick, "core destroyed");
            self.events.push(SimEvent::Defeat { wave });
            return;
        }

        if !wave_spawner::is_complete(&self.store, &self.session.wave) {
            return;
        }

        info!(wave, tick = self.time.tick, "wave complete");
        self.events.push(SimEvent::WaveCompleted { wave });

        if wave >= FINAL_WAVE {
            self.phase = SessionPhase::Victory;
            info!(wave, core = self.session.core.health, "victory");
            self.events.push(SimEvent::Victory { wave });
        } else {
            self.session.wave = WaveState::begin(wave + 1, self.config.inter_wave_pause_ticks);
        }
    }

    /// First turret whose footprint overlaps a new turret at `position`.
    fn turret_near(&self, position: Vec2) -> Option<TurretId> {
        self.store
            .world()
            .query::<(&Turret, &Position)>()
            .iter()
            .filter(|(_, (_, pos))| pos.0.distance(position) < TURRET_FOOTPRINT_RADIUS * 2.0)
            .map(|(_, (turret, _))| turret.id)
            .min()
    }

    fn build_snapshot(&self, events: Vec<SimEvent>) -> SimSnapshot {
        systems::snapshot::build_snapshot(
            &self.store,
            &self.session,
            &self.time,
            self.phase,
            self.config.max_units,
            events,
        )
    }
}
