//! Adaptive difficulty curve.
//!
//! Effective difficulty is the time-driven level scaled by a bounded
//! performance scalar. It drives the population cap and spawn interval.

use bugstorm_core::constants::*;

/// Time-driven difficulty level: +1 every 30 simulated seconds, starting at 1.
pub fn level_for_elapsed(elapsed_secs: f64) -> u32 {
    (elapsed_secs.max(0.0) / DIFFICULTY_STEP_SECS).floor() as u32 + 1
}

/// Kills per simulated second, zero before any time has passed.
pub fn kills_per_second(kills: u32, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }
    kills as f64 / elapsed_secs
}

/// Nudge the adaptive scalar by one step based on current performance.
/// The result always lies in [AI_ADJUSTMENT_MIN, AI_ADJUSTMENT_MAX].
pub fn adjust_scalar(scalar: f64, hp_fraction: f64, kills_per_sec: f64) -> f64 {
    let next = if hp_fraction > AI_STRONG_HP_FRACTION && kills_per_sec > AI_STRONG_KILLS_PER_SEC {
        scalar + AI_ADJUSTMENT_STEP
    } else if hp_fraction < AI_WEAK_HP_FRACTION && kills_per_sec < AI_WEAK_KILLS_PER_SEC {
        scalar - AI_ADJUSTMENT_STEP
    } else {
        scalar
    };
    next.clamp(AI_ADJUSTMENT_MIN, AI_ADJUSTMENT_MAX)
}

/// Maximum live bugs at the given effective difficulty.
pub fn population_cap(effective: f64) -> f64 {
    (BASE_POPULATION_CAP + effective * POPULATION_PER_DIFFICULTY).min(MAX_POPULATION_CAP)
}

/// Ticks between spawns at the given effective difficulty and level.
pub fn spawn_interval(effective: f64, level: u32) -> f64 {
    let base = (BASE_SPAWN_INTERVAL_TICKS - effective * SPAWN_INTERVAL_PER_DIFFICULTY)
        .max(MIN_SPAWN_INTERVAL_TICKS);
    (base - (level as f64 * SPAWN_INTERVAL_PER_LEVEL).floor()).max(SPAWN_INTERVAL_FLOOR_TICKS)
}
