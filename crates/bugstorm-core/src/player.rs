//! The player model and its weapon loadout.
//!
//! The player is not an ECS entity: there is exactly one, every system reads
//! it, and the snapshot exposes it directly.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{Archetype, WeaponKind};
use crate::types::{Position, SpatialActor};

/// One owned weapon with its own fire cooldown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub level: u32,
    pub damage: f64,
    pub fire_rate: f64,
    /// Clock reading of the last volley. `None` until the first shot.
    pub last_fired_ms: Option<u64>,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            level: 1,
            damage: kind.base_damage(),
            fire_rate: kind.fire_rate(),
            last_fired_ms: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn archetype(&self) -> Archetype {
        self.kind.archetype()
    }

    pub fn can_level_up(&self) -> bool {
        self.level < MAX_WEAPON_LEVEL
    }

    /// +25% damage (floored) and +10% fire rate. No-op at max level.
    pub fn level_up(&mut self) -> bool {
        if !self.can_level_up() {
            return false;
        }
        self.level += 1;
        self.damage = (self.damage * WEAPON_DAMAGE_GROWTH).floor();
        self.fire_rate *= WEAPON_FIRE_RATE_GROWTH;
        true
    }

    /// Milliseconds between volleys at the given player attack speed.
    pub fn cooldown_ms(&self, attack_speed: f64) -> f64 {
        1000.0 / (attack_speed * self.fire_rate)
    }

    pub fn is_ready(&self, now_ms: u64, attack_speed: f64) -> bool {
        match self.last_fired_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) as f64 >= self.cooldown_ms(attack_speed),
        }
    }
}

/// The player character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Position,
    pub radius: f64,
    /// Pixels per tick.
    pub speed: f64,
    pub hp: f64,
    pub max_hp: f64,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub kills: u32,
    /// Fraction of incoming damage absorbed, in [0, MAX_DAMAGE_REDUCTION].
    pub damage_reduction: f64,
    pub damage_multiplier: f64,
    pub attack_speed: f64,
    pub attack_range: f64,
    /// Owned weapons in acquisition order.
    pub weapons: Vec<Weapon>,
    pub unlocked_weapons: BTreeSet<WeaponKind>,
}

impl Player {
    pub fn new(position: Position) -> Self {
        let starting = WeaponKind::DebugLog;
        Self {
            position,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            level: 1,
            xp: 0,
            xp_to_next: PLAYER_BASE_XP_TO_NEXT,
            kills: 0,
            damage_reduction: 0.0,
            damage_multiplier: 1.0,
            attack_speed: PLAYER_ATTACK_SPEED,
            attack_range: PLAYER_ATTACK_RANGE,
            weapons: vec![Weapon::new(starting)],
            unlocked_weapons: BTreeSet::from([starting]),
        }
    }

    /// Apply incoming damage after reduction. Returns the damage actually dealt.
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        let dealt = (amount * (1.0 - self.damage_reduction)).max(0.0);
        let before = self.hp;
        self.hp = (self.hp - dealt).max(0.0);
        before - self.hp
    }

    pub fn gain_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
    }

    pub fn ready_to_level_up(&self) -> bool {
        self.xp >= self.xp_to_next
    }

    /// Consume one threshold's worth of xp and grow the threshold.
    /// Returns false if the player does not have enough xp.
    pub fn level_up(&mut self) -> bool {
        if !self.ready_to_level_up() {
            return false;
        }
        self.level += 1;
        self.xp -= self.xp_to_next;
        self.xp_to_next = (self.xp_to_next as f64 * XP_THRESHOLD_GROWTH).floor() as u32;
        true
    }

    pub fn has_unlocked(&self, kind: WeaponKind) -> bool {
        self.unlocked_weapons.contains(&kind)
    }

    /// Add a weapon to the loadout. Unlocking an owned weapon is a no-op
    /// and returns false.
    pub fn unlock_weapon(&mut self, kind: WeaponKind) -> bool {
        if !self.unlocked_weapons.insert(kind) {
            return false;
        }
        self.weapons.push(Weapon::new(kind));
        true
    }

    pub fn weapon(&self, kind: WeaponKind) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.kind == kind)
    }

    pub fn upgrade_weapon(&mut self, kind: WeaponKind) -> bool {
        self.weapons
            .iter_mut()
            .find(|w| w.kind == kind)
            .is_some_and(|w| w.level_up())
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp <= 0.0 {
            return 0.0;
        }
        self.hp / self.max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }
}

impl SpatialActor for Player {
    fn position(&self) -> Position {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}
