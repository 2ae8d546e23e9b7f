//! Rewards system: credits each dying hostile once and removes it.

use tracing::debug;

use obsidian_core::components::{Dying, Hostile};
use obsidian_core::enums::HostileKind;
use obsidian_core::events::SimEvent;
use obsidian_core::types::HostileId;

use crate::economy;
use crate::session::Session;
use crate::store::EntityStore;

/// Run the rewards phase for one tick.
pub fn run(store: &mut EntityStore, session: &mut Session, events: &mut Vec<SimEvent>) {
    let mut dead: Vec<(HostileId, HostileKind, u32)> = store
        .world()
        .query::<(&Hostile, &Dying)>()
        .iter()
        .map(|(_, (hostile, _))| (hostile.id, hostile.kind, hostile.reward))
        .collect();
    dead.sort_by_key(|&(id, _, _)| id);

    for (hostile_id, kind, base_reward) in dead {
        // Credited exactly once: the hostile leaves the store here.
        store.despawn_hostile(hostile_id);

        let reward = economy::credited_reward(base_reward, session.upgrades.economy);
        session.credits = session.credits.saturating_add(reward);
        debug!(id = hostile_id.0, ?kind, reward, credits = session.credits, "hostile killed");
        events.push(SimEvent::HostileKilled {
            hostile_id,
            kind,
            reward,
        });
    }
}
