//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in screen space (pixels). x grows right, y grows down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle to another position in radians (atan2 convention, 0 = +x).
    pub fn angle_to(&self, other: &Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Point at `distance` along `angle` from this position.
    pub fn offset_polar(&self, angle: f64, distance: f64) -> Position {
        Position::new(
            self.x + angle.cos() * distance,
            self.y + angle.sin() * distance,
        )
    }
}

impl From<Position> for DVec2 {
    fn from(p: Position) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Position::new(v.x, v.y)
    }
}

/// Anything that occupies a circle in the world.
pub trait SpatialActor {
    fn position(&self) -> Position;
    fn radius(&self) -> f64;
}

/// A bare circle, used when an actor is assembled from ECS components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Position,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Position, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl SpatialActor for Circle {
    fn position(&self) -> Position {
        self.center
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

/// Circle-circle overlap. Touching circles (distance == sum of radii) do not collide.
pub fn collides<A, B>(a: &A, b: &B) -> bool
where
    A: SpatialActor + ?Sized,
    B: SpatialActor + ?Sized,
{
    a.position().distance_to(&b.position()) < a.radius() + b.radius()
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
