//! Which speaker opens each scripted wave. Text lives with the front end.

use obsidian_core::enums::{HostileKind, Speaker};

/// Speaker for the cue at the start of `wave`, if the wave is scripted.
pub fn cue_for_wave(wave: u8) -> Option<Speaker> {
    use HostileKind::*;

    let speaker = match wave {
        1 | 4 => Speaker::Ally,
        2 => Speaker::Hostile(Swordsman),
        3 => Speaker::Hostile(Necromancer),
        5 | 6 | 9 | 10 => Speaker::Hostile(Loyalist),
        11 | 13 | 15 => Speaker::Hostile(Commander),
        12 => Speaker::Hostile(OriginEnforcer),
        14 | 16 | 19 | 20 => Speaker::Hostile(King),
        _ => return None,
    };
    Some(speaker)
}

/// Whether the speaker's identity has been revealed by `wave`.
pub fn is_revealed(speaker: Speaker, wave: u8) -> bool {
    match speaker {
        Speaker::Ally => true,
        Speaker::Hostile(HostileKind::Loyalist) => wave >= 10,
        Speaker::Hostile(HostileKind::OriginEnforcer) => wave >= 12,
        Speaker::Hostile(HostileKind::Commander) => wave >= 15,
        Speaker::Hostile(HostileKind::King) => wave >= 20,
        Speaker::Hostile(_) => false,
    }
}
