//! Entity spawn factories.
//!
//! Creates bugs, bosses, projectiles and pickups with their component
//! bundles. Every entity gets a `SpawnOrder` stamp from the session.

use std::f64::consts::TAU;

use hecs::{Entity, World};
use rand::Rng;

use bugstorm_ai::profiles::{boss_stats, bug_stats};
use bugstorm_core::components::*;
use bugstorm_core::constants::*;
use bugstorm_core::enums::*;
use bugstorm_core::types::Position;

use crate::session::SessionState;

/// Spawn a bug of `kind` at `position`, scaled to `difficulty`.
pub fn spawn_bug(
    world: &mut World,
    session: &mut SessionState,
    kind: BugKind,
    position: Position,
    difficulty: u32,
) -> Entity {
    let stats = bug_stats(kind, difficulty);
    world.spawn((
        position,
        Bug {
            kind,
            speed: stats.speed,
            contact_damage: stats.contact_damage,
            xp_value: stats.xp_value,
        },
        Health::full(stats.hp),
        Radius(BUG_RADIUS),
        ContactCooldown::default(),
        session.next_spawn_order(),
    ))
}

/// A random point just outside one of the four screen edges, side chosen uniformly.
pub fn edge_spawn_point<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Position {
    match rng.gen_range(0..4) {
        0 => Position::new(rng.gen::<f64>() * width, -BUG_SPAWN_MARGIN),
        1 => Position::new(width + BUG_SPAWN_MARGIN, rng.gen::<f64>() * height),
        2 => Position::new(rng.gen::<f64>() * width, height + BUG_SPAWN_MARGIN),
        _ => Position::new(-BUG_SPAWN_MARGIN, rng.gen::<f64>() * height),
    }
}

/// Spawn a boss at the top-center of the world.
pub fn spawn_boss(
    world: &mut World,
    session: &mut SessionState,
    kind: BossKind,
    width: f64,
    difficulty: u32,
) -> Entity {
    let stats = boss_stats(kind, difficulty);
    world.spawn((
        Position::new(width / 2.0, BOSS_SPAWN_Y),
        Boss {
            kind,
            speed: stats.speed,
            contact_damage: stats.contact_damage,
            phase: kind.is_final().then_some(1),
            move_counter: 0,
            wander_target: None,
            attack_cooldown_ms: BOSS_ATTACK_COOLDOWN_MS,
            last_special_ms: None,
        },
        Health::full(stats.hp),
        Radius(BOSS_RADIUS),
        ContactCooldown::default(),
        session.next_spawn_order(),
    ))
}

/// Spawn one projectile with archetype-specific speed, size, lifetime and pierce.
pub fn spawn_projectile(
    world: &mut World,
    session: &mut SessionState,
    origin: Position,
    angle: f64,
    damage: f64,
    archetype: Archetype,
) -> Entity {
    let piercing = archetype == Archetype::Piercing;
    let radius = if archetype == Archetype::Area {
        AREA_PROJECTILE_RADIUS
    } else {
        PROJECTILE_RADIUS
    };
    world.spawn((
        origin,
        Projectile {
            angle: angle.rem_euclid(TAU),
            speed: if piercing {
                PIERCING_PROJECTILE_SPEED
            } else {
                PROJECTILE_SPEED
            },
            damage,
            archetype,
            lifetime_ticks: if piercing {
                PIERCING_LIFETIME_TICKS
            } else {
                PROJECTILE_LIFETIME_TICKS
            },
            pierce_remaining: if piercing { PIERCE_COUNT } else { 0 },
            dead: false,
            exploded: false,
        },
        Radius(radius),
        session.next_spawn_order(),
    ))
}

/// Spawn an xp pickup. Magnet boosts already bought apply to it.
pub fn spawn_pickup(
    world: &mut World,
    session: &mut SessionState,
    position: Position,
    xp_value: u32,
) -> Entity {
    world.spawn((
        position,
        Pickup {
            xp_value,
            lifetime_ticks: PICKUP_LIFETIME_TICKS,
            magnet_radius: PICKUP_MAGNET_RADIUS * session.pickup_boost,
            homing_speed: PICKUP_HOMING_SPEED * session.pickup_boost,
        },
        Radius(PICKUP_RADIUS),
        session.next_spawn_order(),
    ))
}
