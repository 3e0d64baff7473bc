//! Skill-biased bug selection.

use bugstorm_core::constants::*;
use bugstorm_core::enums::BugKind;
use rand::Rng;

/// Kills per 10-second window of play.
pub fn player_skill(kills: u32, elapsed_secs: f64) -> f64 {
    kills as f64 / (elapsed_secs / SKILL_WINDOW_SECS).max(1.0)
}

/// Spawn weights aligned with `BugKind::ALL`.
pub fn bug_weights(skill: f64) -> [f64; 4] {
    if skill < SKILL_LOW_THRESHOLD {
        [2.0, 1.0, 1.0, 0.5]
    } else if skill > SKILL_HIGH_THRESHOLD {
        [1.0, 1.5, 1.0, 2.0]
    } else {
        [1.0; 4]
    }
}

/// Walk the weights subtracting from `draw01 * total` and return the first
/// item where the remainder goes non-positive. Falls back when rounding
/// leaves the walk without a selection.
pub fn select_weighted<T: Copy>(items: &[(T, f64)], draw01: f64, fallback: T) -> T {
    let total: f64 = items.iter().map(|(_, w)| w).sum();
    let mut remaining = draw01 * total;
    for &(item, weight) in items {
        remaining -= weight;
        if remaining <= 0.0 {
            return item;
        }
    }
    fallback
}

pub fn choose_bug_kind<R: Rng + ?Sized>(rng: &mut R, skill: f64) -> BugKind {
    let weights = bug_weights(skill);
    let items: Vec<(BugKind, f64)> = BugKind::ALL.into_iter().zip(weights).collect();
    select_weighted(&items, rng.gen::<f64>(), BugKind::SyntaxError)
}
