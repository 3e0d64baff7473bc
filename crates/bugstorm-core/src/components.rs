//! ECS components for hecs entities.
//!
//! Components are plain data apart from a few small state transitions.
//! Movement, combat and cleanup rules live in the simulation systems.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// A regular enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bug {
    pub kind: BugKind,
    /// Pixels per tick.
    pub speed: f64,
    pub contact_damage: f64,
    /// XP carried by the pickup dropped on death.
    pub xp_value: u32,
}

/// A boss enemy. At most one is alive at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub kind: BossKind,
    pub speed: f64,
    pub contact_damage: f64,
    /// Current phase (1-3). Only the final boss has phases.
    pub phase: Option<u8>,
    /// Ticks since the boss spawned, used for wander retargeting.
    pub move_counter: u64,
    /// Erratic-phase destination.
    pub wander_target: Option<Position>,
    pub attack_cooldown_ms: u64,
    /// Clock reading of the last special attack. `None` until the first one.
    pub last_special_ms: Option<u64>,
}

/// Hit points of a bug or boss.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub hp: f64,
    pub max_hp: f64,
}

impl Health {
    pub fn full(max_hp: f64) -> Self {
        Self { hp: max_hp, max_hp }
    }
}

/// Collision radius.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Radius(pub f64);

/// Per-attacker contact damage cooldown.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ContactCooldown {
    /// Clock reading of the last hit on the player. `None` means never.
    pub last_hit_ms: Option<u64>,
}

/// A player projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Heading in radians.
    pub angle: f64,
    pub speed: f64,
    pub damage: f64,
    pub archetype: Archetype,
    pub lifetime_ticks: u32,
    /// Remaining hits for piercing projectiles.
    pub pierce_remaining: u32,
    pub dead: bool,
    /// Set when an area projectile detonates.
    pub exploded: bool,
}

impl Projectile {
    /// Apply the archetype's on-hit rule after the projectile damaged an enemy.
    pub fn on_hit(&mut self) {
        match self.archetype {
            Archetype::Single | Archetype::Spread => self.dead = true,
            Archetype::Piercing => {
                self.pierce_remaining = self.pierce_remaining.saturating_sub(1);
                if self.pierce_remaining == 0 {
                    self.dead = true;
                }
            }
            Archetype::Area => {
                self.exploded = true;
                self.dead = true;
            }
        }
    }
}

/// An experience orb.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub xp_value: u32,
    pub lifetime_ticks: u32,
    pub magnet_radius: f64,
    pub homing_speed: f64,
}

/// Monotonic creation order, used for deterministic iteration and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);
