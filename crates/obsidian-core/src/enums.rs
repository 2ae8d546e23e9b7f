//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Hostile unit kinds. The last four are named, one-off bosses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostileKind {
    #[default]
    Grunt,
    Swordsman,
    Heavy,
    Necromancer,
    /// Summoned by necromancers, never scheduled directly.
    NecromancerMinion,
    Berserker,
    /// Escort of the final waves.
    OverseerProtector,
    /// "The Interceptor".
    Loyalist,
    OriginEnforcer,
    Commander,
    /// "The Overseer".
    King,
}

impl HostileKind {
    pub const ALL: [HostileKind; 11] = [
        HostileKind::Grunt,
        HostileKind::Swordsman,
        HostileKind::Heavy,
        HostileKind::Necromancer,
        HostileKind::NecromancerMinion,
        HostileKind::Berserker,
        HostileKind::OverseerProtector,
        HostileKind::Loyalist,
        HostileKind::OriginEnforcer,
        HostileKind::Commander,
        HostileKind::King,
    ];

    /// Named hostiles spawn at most once per session.
    pub fn is_named(self) -> bool {
        matches!(
            self,
            HostileKind::Loyalist
                | HostileKind::OriginEnforcer
                | HostileKind::Commander
                | HostileKind::King
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HostileKind::Grunt => "grunt",
            HostileKind::Swordsman => "swordsman",
            HostileKind::Heavy => "heavy",
            HostileKind::Necromancer => "necromancer",
            HostileKind::NecromancerMinion => "necromancer_minion",
            HostileKind::Berserker => "berserker",
            HostileKind::OverseerProtector => "overseer_protector",
            HostileKind::Loyalist => "loyalist",
            HostileKind::OriginEnforcer => "origin_enforcer",
            HostileKind::Commander => "commander",
            HostileKind::King => "king",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

/// Turret kinds available for placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurretKind {
    #[default]
    Sentry,
    /// Shotgunner: short-range splash.
    Blaster,
    /// Taser: instant hit that slows.
    Shocker,
    /// Chaingunner: fast, low damage.
    Repeater,
    /// Plasma sniper: instant, very long range.
    Cannon,
    /// Caduceus: heals the core instead of attacking.
    Healer,
}

impl TurretKind {
    pub const ALL: [TurretKind; 6] = [
        TurretKind::Sentry,
        TurretKind::Blaster,
        TurretKind::Shocker,
        TurretKind::Repeater,
        TurretKind::Cannon,
        TurretKind::Healer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TurretKind::Sentry => "sentry",
            TurretKind::Blaster => "blaster",
            TurretKind::Shocker => "shocker",
            TurretKind::Repeater => "repeater",
            TurretKind::Cannon => "cannon",
            TurretKind::Healer => "healer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Name shown on the build menu.
    pub fn display_name(self) -> &'static str {
        match self {
            TurretKind::Sentry => "SENTRY",
            TurretKind::Blaster => "SHOTGUNNER",
            TurretKind::Shocker => "TASER",
            TurretKind::Repeater => "CHAINGUNNER",
            TurretKind::Cannon => "PLASMA SNIPER",
            TurretKind::Healer => "CADUCEUS",
        }
    }

    /// Support turrets target the core rather than hostiles.
    pub fn is_support(self) -> bool {
        matches!(self, TurretKind::Healer)
    }
}

/// Upgrade tracks purchasable during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeCategory {
    Damage,
    Range,
    Core,
    Economy,
}

impl UpgradeCategory {
    pub const ALL: [UpgradeCategory; 4] = [
        UpgradeCategory::Damage,
        UpgradeCategory::Range,
        UpgradeCategory::Core,
        UpgradeCategory::Economy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UpgradeCategory::Damage => "dmg",
            UpgradeCategory::Range => "range",
            UpgradeCategory::Core => "core",
            UpgradeCategory::Economy => "coin",
        }
    }

    /// Accepts both the short shop tags and the long names.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dmg" | "damage" => Some(UpgradeCategory::Damage),
            "range" => Some(UpgradeCategory::Range),
            "core" => Some(UpgradeCategory::Core),
            "coin" | "economy" => Some(UpgradeCategory::Economy),
            _ => None,
        }
    }
}

/// Session lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    Victory,
    Defeat,
}

impl SessionPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Victory | SessionPhase::Defeat)
    }
}

/// Who speaks at a narrative cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    /// The friendly advisor.
    Ally,
    Hostile(HostileKind),
}

/// How a projectile reaches its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delivery {
    /// Travels each tick toward the target's current position.
    #[default]
    Homing,
    /// Resolves in the collision phase of the tick it was fired.
    Instant,
}

/// Rank derived from the total number of purchased upgrade levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandRank {
    #[default]
    Leader,
    Captain,
    Commander,
}

impl CommandRank {
    pub fn title(self) -> &'static str {
        match self {
            CommandRank::Leader => "Base Leader",
            CommandRank::Captain => "Base Captain",
            CommandRank::Commander => "Base Commander",
        }
    }
}
