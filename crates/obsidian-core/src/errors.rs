//! Rejections for player actions. A rejected action leaves the session untouched.

use std::fmt;

use crate::enums::UpgradeCategory;
use crate::types::TurretId;

/// Error when placing a turret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// No session is running.
    NotRunning,
    /// Position lies outside the playfield.
    OutOfBounds,
    /// Position overlaps the core.
    InsideCore,
    /// Position overlaps an existing turret.
    Occupied(TurretId),
    /// Unit cap reached.
    UnitCapReached { cap: u32 },
    InsufficientCredits { cost: u32, available: u32 },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::NotRunning => write!(f, "no session is running"),
            PlacementError::OutOfBounds => write!(f, "position is outside the playfield"),
            PlacementError::InsideCore => write!(f, "position overlaps the core"),
            PlacementError::Occupied(id) => write!(f, "position overlaps {id}"),
            PlacementError::UnitCapReached { cap } => write!(f, "unit cap of {cap} reached"),
            PlacementError::InsufficientCredits { cost, available } => {
                write!(f, "needs {cost} credits, have {available}")
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// Error when selling a turret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SellError {
    NotRunning,
    /// No live turret has this id.
    UnknownTurret(TurretId),
}

impl fmt::Display for SellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SellError::NotRunning => write!(f, "no session is running"),
            SellError::UnknownTurret(id) => write!(f, "{id} does not exist"),
        }
    }
}

impl std::error::Error for SellError {}

/// Error when purchasing an upgrade level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeError {
    NotRunning,
    MaxLevel(UpgradeCategory),
    InsufficientCredits { cost: u32, available: u32 },
}

impl fmt::Display for UpgradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpgradeError::NotRunning => write!(f, "no session is running"),
            UpgradeError::MaxLevel(category) => {
                write!(f, "{} upgrade is at max level", category.as_str())
            }
            UpgradeError::InsufficientCredits { cost, available } => {
                write!(f, "needs {cost} credits, have {available}")
            }
        }
    }
}

impl std::error::Error for UpgradeError {}

/// Error when repairing the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairError {
    NotRunning,
    AlreadyFull,
    InsufficientCredits { cost: u32, available: u32 },
}

impl fmt::Display for RepairError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepairError::NotRunning => write!(f, "no session is running"),
            RepairError::AlreadyFull => write!(f, "core is already at full health"),
            RepairError::InsufficientCredits { cost, available } => {
                write!(f, "needs {cost} credits, have {available}")
            }
        }
    }
}

impl std::error::Error for RepairError {}
