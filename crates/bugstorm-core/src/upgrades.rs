//! Level-up upgrade vocabulary.

use serde::{Deserialize, Serialize};

use crate::constants::{DAMAGE_REDUCTION_STEP, MAX_DAMAGE_REDUCTION, MAX_HP_BOOST};
use crate::enums::WeaponKind;
use crate::player::Player;

/// A single option presented on level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "weapon")]
pub enum Upgrade {
    RapidFire,
    MultiThreading,
    ErrorHandling,
    CodeOptimization,
    EnhancedDebugging,
    ExtendedRange,
    MagnetBoost,
    DefensiveProtocols,
    UnlockWeapon(WeaponKind),
    UpgradeWeapon(WeaponKind),
}

/// Coarse grouping used by the offer anti-repeat rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeCategory {
    AttackSpeed,
    Damage,
    Other,
}

/// Flat stat boosts, always available.
pub const STAT_BOOSTS: [Upgrade; 8] = [
    Upgrade::RapidFire,
    Upgrade::MultiThreading,
    Upgrade::ErrorHandling,
    Upgrade::CodeOptimization,
    Upgrade::EnhancedDebugging,
    Upgrade::ExtendedRange,
    Upgrade::MagnetBoost,
    Upgrade::DefensiveProtocols,
];

impl Upgrade {
    pub fn category(self) -> UpgradeCategory {
        match self {
            Upgrade::RapidFire | Upgrade::MultiThreading => UpgradeCategory::AttackSpeed,
            Upgrade::EnhancedDebugging => UpgradeCategory::Damage,
            _ => UpgradeCategory::Other,
        }
    }

    pub fn is_stat_boost(self) -> bool {
        !matches!(self, Upgrade::UnlockWeapon(_) | Upgrade::UpgradeWeapon(_))
    }

    pub fn title(self) -> String {
        match self {
            Upgrade::RapidFire => "Rapid Fire Protocol".into(),
            Upgrade::MultiThreading => "Multi-threading".into(),
            Upgrade::ErrorHandling => "Better Error Handling".into(),
            Upgrade::CodeOptimization => "Code Optimization".into(),
            Upgrade::EnhancedDebugging => "Enhanced Debugging".into(),
            Upgrade::ExtendedRange => "Extended Range".into(),
            Upgrade::MagnetBoost => "XP Magnet Boost".into(),
            Upgrade::DefensiveProtocols => "Defensive Protocols".into(),
            Upgrade::UnlockWeapon(kind) => format!("Unlock {}", kind.name()),
            Upgrade::UpgradeWeapon(kind) => format!("Upgrade {}", kind.name()),
        }
    }

    /// Player-facing description. Weapon upgrades mention the current level.
    pub fn description(self, player: &Player) -> String {
        match self {
            Upgrade::RapidFire => "Attack speed +20%".into(),
            Upgrade::MultiThreading => "Attack speed +35%".into(),
            Upgrade::ErrorHandling => "Max HP +30, Full heal".into(),
            Upgrade::CodeOptimization => "Movement speed +20%".into(),
            Upgrade::EnhancedDebugging => "Base damage +30%".into(),
            Upgrade::ExtendedRange => "Attack range +40%".into(),
            Upgrade::MagnetBoost => "XP collection +25% faster + wider range".into(),
            Upgrade::DefensiveProtocols => "Take 15% less damage from all sources".into(),
            Upgrade::UnlockWeapon(kind) => match kind {
                WeaponKind::ConsoleTrace => "Piercing debugger that goes through multiple bugs",
                WeaponKind::ArraySpread => "Spread shot fires 3 projectiles at once",
                WeaponKind::ExceptionThrow => "Area damage explosive debugging",
                WeaponKind::PromiseResolve => "High-speed async debugging tool",
                WeaponKind::DebugLog => "Basic single-target debugger",
            }
            .into(),
            Upgrade::UpgradeWeapon(kind) => {
                let level = player.weapon(kind).map_or(1, |w| w.level);
                format!("Level {} -> {} (+25% damage, +10% speed)", level, level + 1)
            }
        }
    }

    /// Apply the player-side effect. `MagnetBoost` only touches pickups,
    /// which the simulation owns, so it leaves the player unchanged.
    pub fn apply_to_player(self, player: &mut Player) {
        match self {
            Upgrade::RapidFire => player.attack_speed *= 1.2,
            Upgrade::MultiThreading => player.attack_speed *= 1.35,
            Upgrade::ErrorHandling => {
                player.max_hp += MAX_HP_BOOST;
                player.hp = player.max_hp;
            }
            Upgrade::CodeOptimization => player.speed *= 1.2,
            Upgrade::EnhancedDebugging => player.damage_multiplier *= 1.3,
            Upgrade::ExtendedRange => player.attack_range *= 1.4,
            Upgrade::MagnetBoost => {}
            Upgrade::DefensiveProtocols => {
                player.damage_reduction =
                    (player.damage_reduction + DAMAGE_REDUCTION_STEP).min(MAX_DAMAGE_REDUCTION);
            }
            Upgrade::UnlockWeapon(kind) => {
                player.unlock_weapon(kind);
            }
            Upgrade::UpgradeWeapon(kind) => {
                player.upgrade_weapon(kind);
            }
        }
    }
}
