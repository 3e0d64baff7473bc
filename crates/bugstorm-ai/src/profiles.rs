//! Archetype stat tables.
//!
//! Base stats per bug and boss kind, scaled by the difficulty level at
//! spawn time. Difficulty may be zero for weakened boss reinforcements.

use bugstorm_core::enums::{BossKind, BugKind};

/// Spawn-time stats for a bug.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BugStats {
    pub hp: f64,
    pub speed: f64,
    pub contact_damage: f64,
    pub xp_value: u32,
}

/// Spawn-time stats for a boss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossStats {
    pub hp: f64,
    pub speed: f64,
    pub contact_damage: f64,
}

struct BugBase {
    hp: f64,
    speed: f64,
    damage: f64,
    xp: f64,
}

fn bug_base(kind: BugKind) -> BugBase {
    match kind {
        BugKind::SyntaxError => BugBase {
            hp: 50.0,
            speed: 1.5,
            damage: 12.0,
            xp: 10.0,
        },
        BugKind::NullPointer => BugBase {
            hp: 65.0,
            speed: 1.0,
            damage: 18.0,
            xp: 15.0,
        },
        BugKind::LogicBug => BugBase {
            hp: 60.0,
            speed: 2.0,
            damage: 15.0,
            xp: 12.0,
        },
        BugKind::MemoryLeak => BugBase {
            hp: 75.0,
            speed: 0.8,
            damage: 20.0,
            xp: 25.0,
        },
    }
}

/// Stats for a bug spawned at the given difficulty level.
pub fn bug_stats(kind: BugKind, difficulty: u32) -> BugStats {
    let base = bug_base(kind);
    let d = difficulty as f64;
    let hp_mult = 1.0 + (d - 1.0) * 0.4;
    let damage_mult = 1.0 + (d - 1.0) * 0.15;
    BugStats {
        hp: (base.hp * hp_mult).floor(),
        speed: base.speed,
        contact_damage: (base.damage * damage_mult).floor(),
        xp_value: (base.xp * (1.0 + d * 0.1)).floor() as u32,
    }
}

/// Stats for a boss spawned at the given difficulty level.
pub fn boss_stats(kind: BossKind, difficulty: u32) -> BossStats {
    let (hp, speed, damage) = match kind {
        BossKind::SyntaxBoss => (300.0, 0.5, 20.0),
        BossKind::LogicBoss => (450.0, 0.7, 25.0),
        BossKind::MemoryBoss => (600.0, 0.4, 30.0),
        BossKind::NetworkBoss => (750.0, 0.8, 32.0),
        BossKind::SecurityBoss => (900.0, 0.3, 35.0),
        BossKind::GitBoss => (1200.0, 0.6, 40.0),
    };
    let d = difficulty as f64;
    BossStats {
        hp: (hp * (1.0 + (d - 1.0) * 0.5)).floor(),
        speed,
        contact_damage: (damage * (1.0 + (d - 1.0) * 0.3)).floor(),
    }
}
