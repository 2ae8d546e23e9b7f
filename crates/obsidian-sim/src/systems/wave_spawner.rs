//! Wave spawning system: announces waves, spawns hostiles on their interval,
//! and lets necromancers summon minions.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use obsidian_core::components::{Hostile, PathProgress, Summoner};
use obsidian_core::constants::NECROMANCER_SUMMON_INTERVAL_TICKS;
use obsidian_core::enums::HostileKind;
use obsidian_core::events::SimEvent;
use obsidian_roster::narrative;
use obsidian_roster::route::Route;
use obsidian_roster::waves::{self, WavePlan};

use crate::store::EntityStore;
use crate::world_setup;

/// Progress through the current wave.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveState {
    pub plan: WavePlan,
    /// Scheduled spawns so far. Never exceeds `plan.count`.
    pub spawned: u32,
    /// Ticks until the next scheduled spawn.
    pub spawn_timer: u32,
    /// Whether the start-of-wave events went out.
    pub announced: bool,
}

impl WaveState {
    /// Begin `wave`, holding the first spawn back by `delay_ticks`.
    pub fn begin(wave: u8, delay_ticks: u32) -> Self {
        Self {
            plan: waves::plan_for(wave),
            spawned: 0,
            spawn_timer: delay_ticks,
            announced: false,
        }
    }

    pub fn number(&self) -> u8 {
        self.plan.wave
    }

    pub fn all_spawned(&self) -> bool {
        self.spawned >= self.plan.count
    }

    /// Scheduled spawns still to come.
    pub fn unspawned(&self) -> u32 {
        self.plan.count.saturating_sub(self.spawned)
    }
}

/// Run the spawning phase for one tick.
pub fn run(
    store: &mut EntityStore,
    state: &mut WaveState,
    lanes: &[Route],
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
) {
    let wave = state.number();

    if !state.announced {
        state.announced = true;
        announce(&state.plan, events);
    }

    summon_minions(store, lanes, events);

    if state.all_spawned() || lanes.is_empty() {
        return;
    }

    if state.spawn_timer > 0 {
        state.spawn_timer -= 1;
    }
    if state.spawn_timer > 0 {
        return;
    }

    let kind = waves::choose_kind(&state.plan, state.spawned, rng);
    let lane = rng.gen_range(0..lanes.len());
    let hostile_id = world_setup::spawn_hostile(store, kind, wave, lane, &lanes[lane], 0.0);
    state.spawned += 1;
    state.spawn_timer = state.plan.interval_ticks;

    if kind.is_named() {
        info!(wave, ?kind, "named hostile entered the field");
    } else {
        debug!(wave, ?kind, id = hostile_id.0, lane, "hostile spawned");
    }
    events.push(SimEvent::HostileSpawned {
        hostile_id,
        kind,
        wave,
    });
}

/// Whether the wave is finished: everything spawned and nothing of it alive.
pub fn is_complete(store: &EntityStore, state: &WaveState) -> bool {
    state.all_spawned() && store.hostiles_in_wave(state.number()) == 0
}

/// Hostiles of the current wave still to be dealt with.
pub fn remaining_in_wave(store: &EntityStore, state: &WaveState) -> u32 {
    state.unspawned() + store.hostiles_in_wave(state.number())
}

fn announce(plan: &WavePlan, events: &mut Vec<SimEvent>) {
    info!(
        wave = plan.wave,
        count = plan.count,
        interval = plan.interval_ticks,
        "wave started"
    );
    events.push(SimEvent::WaveStarted {
        wave: plan.wave,
        hostile_count: plan.count,
    });

    if let Some(speaker) = narrative::cue_for_wave(plan.wave) {
        events.push(SimEvent::NarrativeCue {
            wave: plan.wave,
            speaker,
            revealed: narrative::is_revealed(speaker, plan.wave),
        });
    }
}

/// Tick summon timers and spawn a minion beside each necromancer that is due.
fn summon_minions(store: &mut EntityStore, lanes: &[Route], events: &mut Vec<SimEvent>) {
    let mut due: Vec<(u8, usize, f32)> = Vec::new();

    for (_entity, (hostile, summoner, progress)) in store
        .world_mut()
        .query_mut::<(&Hostile, &mut Summoner, &PathProgress)>()
    {
        summoner.ticks_until_summon = summoner.ticks_until_summon.saturating_sub(1);
        if summoner.ticks_until_summon == 0 {
            summoner.ticks_until_summon = NECROMANCER_SUMMON_INTERVAL_TICKS;
            due.push((hostile.wave, progress.lane, progress.travelled));
        }
    }

    for (wave, lane, travelled) in due {
        let Some(route) = lanes.get(lane) else {
            continue;
        };
        let kind = HostileKind::NecromancerMinion;
        let hostile_id = world_setup::spawn_hostile(store, kind, wave, lane, route, travelled);
        debug!(wave, id = hostile_id.0, "minion summoned");
        events.push(SimEvent::HostileSpawned {
            hostile_id,
            kind,
            wave,
        });
    }
}
