//! Simulation constants and tuning parameters.
//!
//! Distances are in pixels, speeds in pixels per tick, cooldowns in
//! milliseconds of clock time.

/// Simulation tick rate (Hz), matching a typical display refresh.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World bounds ---

/// Default playfield width.
pub const WORLD_WIDTH: f64 = 1200.0;

/// Default playfield height.
pub const WORLD_HEIGHT: f64 = 800.0;

// --- Player ---

pub const PLAYER_RADIUS: f64 = 15.0;

pub const PLAYER_SPEED: f64 = 3.0;

pub const PLAYER_MAX_HP: f64 = 100.0;

/// XP needed for the first level-up.
pub const PLAYER_BASE_XP_TO_NEXT: u32 = 100;

/// Compounding growth of the level threshold.
pub const XP_THRESHOLD_GROWTH: f64 = 1.15;

/// Attacks per second before per-weapon fire rate.
pub const PLAYER_ATTACK_SPEED: f64 = 1.2;

/// Targeting range for auto-attack.
pub const PLAYER_ATTACK_RANGE: f64 = 150.0;

/// Diagonal input is scaled by 1/sqrt(2) so speed stays constant.
pub const DIAGONAL_FACTOR: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Upper bound on accumulated damage reduction.
pub const MAX_DAMAGE_REDUCTION: f64 = 0.75;

// --- Weapons ---

pub const MAX_WEAPON_LEVEL: u32 = 10;

/// Damage growth per weapon level (+25%, floored).
pub const WEAPON_DAMAGE_GROWTH: f64 = 1.25;

/// Fire-rate growth per weapon level (+10%).
pub const WEAPON_FIRE_RATE_GROWTH: f64 = 1.1;

// --- Bugs ---

pub const BUG_RADIUS: f64 = 12.0;

/// How far outside the screen edge new bugs appear.
pub const BUG_SPAWN_MARGIN: f64 = 20.0;

// --- Spawning ---

/// Ticks between spawns at effective difficulty 0.
pub const BASE_SPAWN_INTERVAL_TICKS: f64 = 60.0;

/// Interval reduction per point of effective difficulty.
pub const SPAWN_INTERVAL_PER_DIFFICULTY: f64 = 3.0;

/// Floor for the difficulty-derived base interval.
pub const MIN_SPAWN_INTERVAL_TICKS: f64 = 15.0;

/// Interval reduction per difficulty level, applied on top of the base interval.
pub const SPAWN_INTERVAL_PER_LEVEL: f64 = 5.0;

/// Floor for the final spawn interval.
pub const SPAWN_INTERVAL_FLOOR_TICKS: f64 = 20.0;

pub const BASE_POPULATION_CAP: f64 = 50.0;

pub const POPULATION_PER_DIFFICULTY: f64 = 5.0;

pub const MAX_POPULATION_CAP: f64 = 100.0;

/// Window for the kills-based skill estimate that biases bug selection.
pub const SKILL_WINDOW_SECS: f64 = 10.0;

/// Below this many kills per window the spawner favours weak bugs.
pub const SKILL_LOW_THRESHOLD: f64 = 1.0;

/// Above this many kills per window the spawner favours punishing bugs.
pub const SKILL_HIGH_THRESHOLD: f64 = 3.0;

// --- Difficulty ---

/// Simulated seconds per difficulty level.
pub const DIFFICULTY_STEP_SECS: f64 = 30.0;

pub const AI_ADJUSTMENT_MIN: f64 = 0.5;

pub const AI_ADJUSTMENT_MAX: f64 = 2.0;

/// Per-tick nudge of the adaptive scalar.
pub const AI_ADJUSTMENT_STEP: f64 = 0.01;

pub const AI_STRONG_HP_FRACTION: f64 = 0.8;

pub const AI_STRONG_KILLS_PER_SEC: f64 = 2.0;

pub const AI_WEAK_HP_FRACTION: f64 = 0.3;

pub const AI_WEAK_KILLS_PER_SEC: f64 = 0.5;

// --- Contact damage ---

/// Per-attacker cooldown between contact hits on the player.
pub const CONTACT_COOLDOWN_MS: u64 = 1000;

// --- Bosses ---

pub const BOSS_RADIUS: f64 = 40.0;

/// Player level that triggers the first boss.
pub const FIRST_BOSS_LEVEL: u32 = 5;

/// Level spacing between bosses.
pub const BOSS_LEVEL_STEP: u32 = 5;

/// Threshold of the final boss. Defeating it completes the run.
pub const FINAL_BOSS_LEVEL: u32 = 30;

/// Vertical spawn position of bosses (horizontally centered).
pub const BOSS_SPAWN_Y: f64 = 100.0;

/// Minimum clock time between boss special attacks.
pub const BOSS_ATTACK_COOLDOWN_MS: u64 = 3000;

/// Final boss leaves phase 1 below this hp fraction.
pub const GIT_BOSS_PHASE_2_FRACTION: f64 = 0.66;

/// Final boss enters phase 3 at or below this hp fraction.
pub const GIT_BOSS_PHASE_3_FRACTION: f64 = 0.33;

/// Ticks between new wander targets in the erratic phase.
pub const GIT_BOSS_WANDER_INTERVAL_TICKS: u64 = 60;

/// Distance at which the erratic phase stops moving toward its wander target.
pub const GIT_BOSS_WANDER_ARRIVAL: f64 = 5.0;

// --- Projectiles ---

pub const PROJECTILE_SPEED: f64 = 8.0;

pub const PIERCING_PROJECTILE_SPEED: f64 = 12.0;

pub const PROJECTILE_RADIUS: f64 = 3.0;

pub const AREA_PROJECTILE_RADIUS: f64 = 5.0;

pub const PROJECTILE_LIFETIME_TICKS: u32 = 120;

pub const PIERCING_LIFETIME_TICKS: u32 = 180;

/// Enemies a piercing projectile passes through before dying.
pub const PIERCE_COUNT: u32 = 3;

/// Angular offset between spread pellets (radians).
pub const SPREAD_ANGLE: f64 = 0.3;

pub const SPREAD_DAMAGE_FACTOR: f64 = 0.8;

/// Piercing weapons look for targets this much farther than the base range.
pub const PIERCING_RANGE_FACTOR: f64 = 1.5;

pub const AREA_SPLASH_RADIUS: f64 = 40.0;

pub const AREA_SPLASH_FACTOR: f64 = 0.5;

// --- Pickups ---

pub const PICKUP_RADIUS: f64 = 8.0;

pub const PICKUP_LIFETIME_TICKS: u32 = 600;

pub const PICKUP_MAGNET_RADIUS: f64 = 150.0;

pub const PICKUP_HOMING_SPEED: f64 = 4.0;

/// Multiplier applied by the magnet upgrade.
pub const MAGNET_BOOST: f64 = 1.25;

// --- Upgrades ---

/// Offers presented per level-up.
pub const UPGRADE_OFFER_COUNT: usize = 3;

/// Weapon unlocks are prioritised up to and including this level.
pub const UNLOCK_PRIORITY_MAX_LEVEL: u32 = 15;

pub const DAMAGE_REDUCTION_STEP: f64 = 0.15;

pub const MAX_HP_BOOST: f64 = 30.0;
