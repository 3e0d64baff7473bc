//! Game state snapshot, the complete visible state handed to the renderer each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SoundEvent;
use crate::types::{Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub sound_enabled: bool,
    /// Whether sound was toggled at any point this session.
    pub sound_toggled: bool,
    pub player: PlayerView,
    /// Live bugs in spawn order.
    pub bugs: Vec<BugView>,
    pub boss: Option<BossView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
    /// Pending choices while in `GamePhase::LevelUp`, empty otherwise.
    pub upgrade_offers: Vec<UpgradeOfferView>,
    pub difficulty: DifficultyView,
    /// `None` once the final boss is down.
    pub next_boss_level: Option<u32>,
    pub game_complete: bool,
    /// Sound events raised during this tick.
    pub sound_events: Vec<SoundEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub radius: f64,
    pub hp: f64,
    pub max_hp: f64,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub kills: u32,
    pub damage_reduction: f64,
    pub attack_range: f64,
    /// Owned weapons in acquisition order.
    pub weapons: Vec<WeaponView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponView {
    pub kind: WeaponKind,
    pub name: String,
    pub level: u32,
    pub damage: f64,
    pub archetype: Archetype,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BugView {
    pub kind: BugKind,
    pub position: Position,
    pub radius: f64,
    pub hp: f64,
    pub max_hp: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub kind: BossKind,
    pub name: String,
    pub position: Position,
    pub radius: f64,
    pub hp: f64,
    pub max_hp: f64,
    /// Final-boss phase for display.
    pub phase: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub radius: f64,
    pub angle: f64,
    pub archetype: Archetype,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub position: Position,
    pub radius: f64,
    pub xp_value: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeOfferView {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DifficultyView {
    pub level: u32,
    /// Adaptive scalar in [0.5, 2.0].
    pub ai_adjustment: f64,
    /// `level * ai_adjustment`.
    pub effective: f64,
    pub population_cap: f64,
    /// Ticks between spawns.
    pub spawn_interval: f64,
    pub bosses_defeated: u32,
}
