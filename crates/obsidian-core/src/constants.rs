//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Playfield ---

pub const PLAYFIELD_WIDTH: f32 = 1800.0;
pub const PLAYFIELD_HEIGHT: f32 = 1200.0;

/// Core center.
pub const CORE_X: f32 = 900.0;
pub const CORE_Y: f32 = 600.0;

/// Hostiles within this distance of the core center have arrived.
pub const CORE_RADIUS: f32 = 100.0;

// --- Session defaults ---

pub const STARTING_CREDITS: u32 = 600;
pub const STARTING_CORE_HEALTH: f32 = 100.0;
pub const STARTING_WAVE: u8 = 1;

/// Completing this wave wins the session.
pub const FINAL_WAVE: u8 = 20;

/// Maximum number of simultaneously placed turrets.
pub const MAX_UNITS: u32 = 30;

/// Ticks between a wave's completion and the next wave's first spawn.
pub const INTER_WAVE_PAUSE_TICKS: u32 = 180;

// --- Placement ---

/// Turrets may not be placed closer than twice this to each other.
pub const TURRET_FOOTPRINT_RADIUS: f32 = 25.0;

/// Fraction of a turret's cost returned when sold (floored).
pub const SELL_REFUND_RATIO: f32 = 0.6;

// --- Core maintenance ---

pub const REPAIR_COST: u32 = 500;
pub const REPAIR_AMOUNT: f32 = 50.0;

// --- Upgrades ---

pub const UPGRADE_MAX_LEVEL: u8 = 10;

/// Cost of level L is floor(base * growth^L).
pub const UPGRADE_COST_GROWTH: f64 = 1.8;

pub const DAMAGE_UPGRADE_BASE_COST: u32 = 400;
pub const RANGE_UPGRADE_BASE_COST: u32 = 400;
pub const CORE_UPGRADE_BASE_COST: u32 = 500;
pub const ECONOMY_UPGRADE_BASE_COST: u32 = 300;

/// Damage multiplier gained per damage level.
pub const DAMAGE_PER_LEVEL: f32 = 0.4;

/// Range multiplier gained per range level.
pub const RANGE_PER_LEVEL: f32 = 0.1;

/// Reward multiplier gained per economy level.
pub const REWARD_PER_LEVEL: f32 = 0.2;

/// Added to both max and current core health per core level.
pub const CORE_HEALTH_PER_LEVEL: f32 = 200.0;

/// Total upgrade levels needed for each rank.
pub const RANK_CAPTAIN_LEVELS: u32 = 10;
pub const RANK_COMMANDER_LEVELS: u32 = 20;

// --- Projectiles ---

/// Homing projectiles closer than this to their aim point hit.
pub const PROJECTILE_HIT_THRESHOLD: f32 = 12.0;

pub const PROJECTILE_MAX_LIFETIME_TICKS: u32 = 240;

/// Projectiles further than this outside the playfield are dropped.
pub const PROJECTILE_BOUNDS_MARGIN: f32 = 50.0;

// --- Hostile behavior ---

pub const NECROMANCER_SUMMON_INTERVAL_TICKS: u32 = 240;

/// Hostiles this close to a turret damage it.
pub const HOSTILE_MELEE_RANGE: f32 = 40.0;

/// Fraction of contact damage dealt to a turret per tick of melee.
pub const MELEE_DAMAGE_FACTOR: f32 = 0.02;
