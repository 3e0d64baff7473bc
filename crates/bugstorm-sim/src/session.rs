//! Per-session state that is not attached to any entity.

use hecs::Entity;

use bugstorm_ai::difficulty::{population_cap, spawn_interval};
use bugstorm_core::components::SpawnOrder;
use bugstorm_core::constants::FIRST_BOSS_LEVEL;
use bugstorm_core::upgrades::{Upgrade, UpgradeCategory};

/// Difficulty, boss and level-up bookkeeping for one session.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Time-driven level, never decreases.
    pub difficulty_level: u32,
    /// Adaptive scalar in [0.5, 2.0].
    pub ai_adjustment: f64,
    pub population_cap: f64,
    /// Ticks between spawns.
    pub spawn_interval: f64,
    pub spawn_counter: u32,
    pub next_boss_level: u32,
    /// The live boss, if any.
    pub boss: Option<Entity>,
    /// Set when a boss spawns, cleared when it is defeated.
    pub boss_spawned: bool,
    pub game_complete: bool,
    pub bosses_defeated: u32,
    /// Cumulative magnet multiplier applied to newly spawned pickups.
    pub pickup_boost: f64,
    /// Offers awaiting a choice while in the level-up phase.
    pub pending_offers: Vec<Upgrade>,
    /// Categories of the previous level-up's offered set.
    pub last_offer_categories: Vec<UpgradeCategory>,
    pub(crate) next_spawn_order: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            difficulty_level: 1,
            ai_adjustment: 1.0,
            population_cap: population_cap(1.0),
            spawn_interval: spawn_interval(1.0, 1),
            spawn_counter: 0,
            next_boss_level: FIRST_BOSS_LEVEL,
            boss: None,
            boss_spawned: false,
            game_complete: false,
            bosses_defeated: 0,
            pickup_boost: 1.0,
            pending_offers: Vec::new(),
            last_offer_categories: Vec::new(),
            next_spawn_order: 0,
        }
    }
}

impl SessionState {
    /// Difficulty level scaled by the adaptive scalar.
    pub fn effective_difficulty(&self) -> f64 {
        self.difficulty_level as f64 * self.ai_adjustment
    }

    /// Allocate the next creation-order stamp.
    pub fn next_spawn_order(&mut self) -> SpawnOrder {
        let order = SpawnOrder(self.next_spawn_order);
        self.next_spawn_order += 1;
        order
    }
}
