//! Straight-line steering.

use bugstorm_core::types::Position;
use glam::DVec2;

/// Move `speed` units from `from` toward `to`. Coincident points stay put.
pub fn step_toward(from: Position, to: Position, speed: f64) -> Position {
    step_toward_until(from, to, speed, 0.0)
}

/// Like [`step_toward`], but only moves while farther than `stop_within`.
pub fn step_toward_until(from: Position, to: Position, speed: f64, stop_within: f64) -> Position {
    let a = DVec2::from(from);
    let delta = DVec2::from(to) - a;
    let distance = delta.length();
    if distance <= stop_within || distance == 0.0 {
        return from;
    }
    (a + delta / distance * speed).into()
}
