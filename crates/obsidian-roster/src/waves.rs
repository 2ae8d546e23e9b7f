//! Wave table and spawn mix.
//!
//! Each wave has a fixed hostile count and spawn interval. Which kind fills
//! each spawn slot is a weighted roll against the wave's mix, except the last
//! slot of a boss wave, which is always that wave's named hostile.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use obsidian_core::constants::FINAL_WAVE;
use obsidian_core::enums::HostileKind;

/// Count and pacing for one wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavePlan {
    pub wave: u8,
    /// Scheduled spawns. Summoned minions are not included.
    pub count: u32,
    /// Ticks between spawns.
    pub interval_ticks: u32,
}

/// (count, interval) for waves 1..=20.
const WAVE_TABLE: [(u32, u32); FINAL_WAVE as usize] = [
    (15, 60),
    (30, 55),
    (45, 50),
    (60, 48),
    (70, 45),
    (80, 42),
    (90, 40),
    (100, 38),
    (110, 35),
    (120, 32),
    (130, 30),
    (140, 28),
    (150, 25),
    (160, 22),
    (180, 20),
    (200, 18),
    (220, 15),
    (250, 12),
    (300, 10),
    (95, 25),
];

/// Plan for a wave, `None` outside 1..=20.
pub fn plan(wave: u8) -> Option<WavePlan> {
    let index = usize::from(wave).checked_sub(1)?;
    WAVE_TABLE.get(index).map(|&(count, interval_ticks)| WavePlan {
        wave,
        count,
        interval_ticks,
    })
}

/// Plan for a wave, clamping the number into 1..=20.
pub fn plan_for(wave: u8) -> WavePlan {
    let wave = wave.clamp(1, FINAL_WAVE);
    let (count, interval_ticks) = WAVE_TABLE[usize::from(wave - 1)];
    WavePlan {
        wave,
        count,
        interval_ticks,
    }
}

/// Named hostile closing out a wave, if any.
pub fn boss_for_wave(wave: u8) -> Option<HostileKind> {
    match wave {
        10 => Some(HostileKind::Loyalist),
        12 => Some(HostileKind::OriginEnforcer),
        15 => Some(HostileKind::Commander),
        20 => Some(HostileKind::King),
        _ => None,
    }
}

/// Relative spawn weights for a wave's regular slots.
pub fn spawn_weights(wave: u8) -> &'static [(HostileKind, u32)] {
    use HostileKind::*;

    match wave {
        0 | 1 => &[(Grunt, 1)],
        2 => &[(Grunt, 7), (Swordsman, 3)],
        3 => &[(Grunt, 6), (Swordsman, 3), (Necromancer, 1)],
        4..=5 => &[(Grunt, 5), (Swordsman, 3), (Heavy, 1), (Necromancer, 1)],
        6..=7 => &[
            (Grunt, 4),
            (Swordsman, 3),
            (Heavy, 2),
            (Necromancer, 1),
            (Berserker, 1),
        ],
        // Grunts are phased out from here on.
        8..=11 => &[(Swordsman, 4), (Heavy, 3), (Necromancer, 1), (Berserker, 2)],
        12..=15 => &[(Swordsman, 3), (Heavy, 3), (Necromancer, 2), (Berserker, 3)],
        _ => &[
            (Swordsman, 2),
            (Heavy, 3),
            (Necromancer, 2),
            (Berserker, 3),
            (OverseerProtector, 1),
        ],
    }
}

/// Pick the kind for spawn slot `slot` (0-based) of `plan`.
pub fn choose_kind<R: Rng + ?Sized>(plan: &WavePlan, slot: u32, rng: &mut R) -> HostileKind {
    if let Some(boss) = boss_for_wave(plan.wave) {
        if slot + 1 == plan.count {
            return boss;
        }
    }

    let weights = spawn_weights(plan.wave);
    match WeightedIndex::new(weights.iter().map(|&(_, weight)| weight)) {
        Ok(dist) => weights[dist.sample(rng)].0,
        Err(_) => HostileKind::Grunt,
    }
}
