//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::{BOSS_LEVEL_STEP, FINAL_BOSS_LEVEL, FIRST_BOSS_LEVEL};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Title,
    Playing,
    /// Paused while the player chooses an upgrade.
    LevelUp,
    GameOver,
    Victory,
}

impl GamePhase {
    /// No transition leaves a terminal phase within a session.
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Enemy ("bug") archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BugKind {
    /// Fast, fragile, the most common early bug.
    SyntaxError,
    /// Slow and hard-hitting.
    NullPointer,
    /// Fastest bug.
    LogicBug,
    /// Tanky, slow, worth the most xp.
    MemoryLeak,
}

impl BugKind {
    pub const ALL: [BugKind; 4] = [
        BugKind::SyntaxError,
        BugKind::NullPointer,
        BugKind::LogicBug,
        BugKind::MemoryLeak,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BugKind::SyntaxError => "SyntaxError",
            BugKind::NullPointer => "NullPointer",
            BugKind::LogicBug => "LogicBug",
            BugKind::MemoryLeak => "MemoryLeak",
        }
    }
}

/// Boss archetype, one per boss threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossKind {
    SyntaxBoss,
    LogicBoss,
    MemoryBoss,
    NetworkBoss,
    SecurityBoss,
    /// Final boss with three hp-driven phases.
    GitBoss,
}

impl BossKind {
    pub const ALL: [BossKind; 6] = [
        BossKind::SyntaxBoss,
        BossKind::LogicBoss,
        BossKind::MemoryBoss,
        BossKind::NetworkBoss,
        BossKind::SecurityBoss,
        BossKind::GitBoss,
    ];

    /// Boss mapped to a boss-level threshold (5, 10, ..., 30).
    pub fn for_threshold(level: u32) -> Option<BossKind> {
        if level < FIRST_BOSS_LEVEL || level > FINAL_BOSS_LEVEL || level % BOSS_LEVEL_STEP != 0 {
            return None;
        }
        let index = ((level - FIRST_BOSS_LEVEL) / BOSS_LEVEL_STEP) as usize;
        Self::ALL.get(index).copied()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            BossKind::SyntaxBoss => "Syntax Overlord",
            BossKind::LogicBoss => "Logic Destroyer",
            BossKind::MemoryBoss => "Memory Corruptor",
            BossKind::NetworkBoss => "Network Timeout",
            BossKind::SecurityBoss => "Security Breach",
            BossKind::GitBoss => "Git Merge Conflict",
        }
    }

    pub fn is_final(self) -> bool {
        self == BossKind::GitBoss
    }
}

/// Behavioral category shared by weapons and the projectiles they fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// One projectile, dies on first hit.
    Single,
    /// Three pellets in a fan, each dies on first hit.
    Spread,
    /// Passes through several enemies.
    Piercing,
    /// Explodes on first impact, splashing nearby enemies.
    Area,
}

/// Player weapon identity. Each kind appears at most once in the loadout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    DebugLog,
    ConsoleTrace,
    ArraySpread,
    ExceptionThrow,
    PromiseResolve,
}

impl WeaponKind {
    /// Weapons that can be unlocked through level-up offers, in unlock order.
    pub const UNLOCKABLE: [WeaponKind; 4] = [
        WeaponKind::ConsoleTrace,
        WeaponKind::ArraySpread,
        WeaponKind::ExceptionThrow,
        WeaponKind::PromiseResolve,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::DebugLog => "Debug.log()",
            WeaponKind::ConsoleTrace => "Console.trace()",
            WeaponKind::ArraySpread => "Array.spread()",
            WeaponKind::ExceptionThrow => "Exception.throw()",
            WeaponKind::PromiseResolve => "Promise.resolve()",
        }
    }

    pub fn archetype(self) -> Archetype {
        match self {
            WeaponKind::DebugLog | WeaponKind::PromiseResolve => Archetype::Single,
            WeaponKind::ConsoleTrace => Archetype::Piercing,
            WeaponKind::ArraySpread => Archetype::Spread,
            WeaponKind::ExceptionThrow => Archetype::Area,
        }
    }

    /// Damage of a freshly acquired level-1 weapon.
    pub fn base_damage(self) -> f64 {
        match self {
            WeaponKind::DebugLog => 25.0,
            WeaponKind::ConsoleTrace => 35.0,
            WeaponKind::ArraySpread => 22.0,
            WeaponKind::ExceptionThrow => 50.0,
            WeaponKind::PromiseResolve => 30.0,
        }
    }

    /// Fire-rate multiplier of a freshly acquired weapon.
    pub fn fire_rate(self) -> f64 {
        match self {
            WeaponKind::DebugLog => 1.0,
            WeaponKind::ConsoleTrace => 0.8,
            WeaponKind::ArraySpread => 1.2,
            WeaponKind::ExceptionThrow => 0.6,
            WeaponKind::PromiseResolve => 1.5,
        }
    }

    /// Player level at which the weapon becomes offerable. `None` for the starting weapon.
    pub fn unlock_level(self) -> Option<u32> {
        match self {
            WeaponKind::DebugLog => None,
            WeaponKind::ConsoleTrace => Some(3),
            WeaponKind::ArraySpread => Some(5),
            WeaponKind::ExceptionThrow => Some(7),
            WeaponKind::PromiseResolve => Some(10),
        }
    }
}
