//! Combat resolver: projectile hits, contact damage and pickup collection.
//!
//! Positions are sampled once at the start of the pass. Targets are visited
//! in spawn order so results do not depend on ECS storage layout.

use hecs::{Entity, World};
use tracing::trace;

use bugstorm_core::components::*;
use bugstorm_core::constants::*;
use bugstorm_core::enums::Archetype;
use bugstorm_core::events::SoundEvent;
use bugstorm_core::player::Player;
use bugstorm_core::types::{collides, Circle, Position};

use crate::session::SessionState;
use crate::world_setup;

/// What the combat pass changed that the engine must react to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatOutcome {
    pub kills: u32,
    /// The player crossed the xp threshold by collecting a pickup.
    pub level_up: bool,
}

/// Run the full combat pass for one tick.
pub fn run(
    world: &mut World,
    session: &mut SessionState,
    player: &mut Player,
    now_ms: u64,
    sound_events: &mut Vec<SoundEvent>,
    despawn_buffer: &mut Vec<Entity>,
) -> CombatOutcome {
    resolve_projectile_hits(world, session);
    let kills = remove_dead_bugs(world, session, player, sound_events, despawn_buffer);
    resolve_contact_damage(world, player, now_ms, sound_events);
    let level_up = collect_pickups(world, player, sound_events, despawn_buffer);
    CombatOutcome { kills, level_up }
}

fn is_alive(world: &World, entity: Entity) -> bool {
    world.get::<&Health>(entity).is_ok_and(|h| h.hp > 0.0)
}

fn apply_damage(world: &World, entity: Entity, amount: f64) {
    if let Ok(mut health) = world.get::<&mut Health>(entity) {
        health.hp = (health.hp - amount).max(0.0);
    }
}

/// Half damage to every other live bug within the splash radius of `center`.
fn splash(world: &World, bugs: &[(Entity, Circle)], center: Position, damage: f64, skip: Option<Entity>) {
    for (entity, circle) in bugs {
        if Some(*entity) == skip || !is_alive(world, *entity) {
            continue;
        }
        if circle.center.distance_to(&center) < AREA_SPLASH_RADIUS {
            apply_damage(world, *entity, damage * AREA_SPLASH_FACTOR);
        }
    }
}

fn resolve_projectile_hits(world: &mut World, session: &SessionState) {
    let mut bugs: Vec<(SpawnOrder, Entity, Circle)> = world
        .query::<(&Bug, &Position, &Radius, &SpawnOrder)>()
        .iter()
        .map(|(e, (_, pos, r, order))| (*order, e, Circle::new(*pos, r.0)))
        .collect();
    bugs.sort_by_key(|(order, _, _)| *order);
    let bugs: Vec<(Entity, Circle)> = bugs.into_iter().map(|(_, e, c)| (e, c)).collect();

    let boss = session.boss.and_then(|e| {
        let pos = *world.get::<&Position>(e).ok()?;
        let radius = world.get::<&Radius>(e).ok()?.0;
        Some((e, Circle::new(pos, radius)))
    });

    let mut projectiles: Vec<(SpawnOrder, Entity, Circle, Projectile)> = world
        .query::<(&Projectile, &Position, &Radius, &SpawnOrder)>()
        .iter()
        .filter(|(_, (p, _, _, _))| !p.dead)
        .map(|(e, (p, pos, r, order))| (*order, e, Circle::new(*pos, r.0), p.clone()))
        .collect();
    projectiles.sort_by_key(|(order, _, _, _)| *order);

    // The boss absorbs at most one projectile per tick.
    let mut boss_hit = false;

    for (_, entity, circle, mut projectile) in projectiles {
        let area = projectile.archetype == Archetype::Area;

        for (bug, bug_circle) in &bugs {
            if projectile.dead {
                break;
            }
            if !is_alive(world, *bug) || !collides(&circle, bug_circle) {
                continue;
            }
            apply_damage(world, *bug, projectile.damage);
            if area {
                splash(world, &bugs, circle.center, projectile.damage, Some(*bug));
            }
            projectile.on_hit();
        }

        if let Some((boss_entity, boss_circle)) = boss {
            if !projectile.dead
                && !boss_hit
                && is_alive(world, boss_entity)
                && collides(&circle, &boss_circle)
            {
                apply_damage(world, boss_entity, projectile.damage);
                if area {
                    splash(world, &bugs, circle.center, projectile.damage, None);
                }
                projectile.on_hit();
                boss_hit = true;
            }
        }

        if let Ok(mut stored) = world.get::<&mut Projectile>(entity) {
            *stored = projectile;
        }
    }
}

/// Remove every bug at or below zero hp, credit kills and drop pickups.
fn remove_dead_bugs(
    world: &mut World,
    session: &mut SessionState,
    player: &mut Player,
    sound_events: &mut Vec<SoundEvent>,
    despawn_buffer: &mut Vec<Entity>,
) -> u32 {
    let mut dead: Vec<(SpawnOrder, Entity, Position, u32)> = world
        .query::<(&Bug, &Health, &Position, &SpawnOrder)>()
        .iter()
        .filter(|(_, (_, health, _, _))| health.hp <= 0.0)
        .map(|(e, (bug, _, pos, order))| (*order, e, *pos, bug.xp_value))
        .collect();
    dead.sort_by_key(|(order, _, _, _)| *order);

    despawn_buffer.clear();
    for (_, entity, position, xp_value) in &dead {
        despawn_buffer.push(*entity);
        player.kills += 1;
        world_setup::spawn_pickup(world, session, *position, *xp_value);
        sound_events.push(SoundEvent::EnemyDeath);
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    dead.len() as u32
}

fn cooldown_elapsed(cooldown: &ContactCooldown, now_ms: u64) -> bool {
    cooldown
        .last_hit_ms
        .map_or(true, |last| now_ms.saturating_sub(last) >= CONTACT_COOLDOWN_MS)
}

/// Per-attacker contact damage with a wall-clock cooldown.
fn resolve_contact_damage(
    world: &mut World,
    player: &mut Player,
    now_ms: u64,
    sound_events: &mut Vec<SoundEvent>,
) {
    let player_circle = Circle::new(player.position, player.radius);

    for (_entity, (pos, radius, health, cooldown, bug, boss)) in world.query_mut::<(
        &Position,
        &Radius,
        &Health,
        &mut ContactCooldown,
        Option<&Bug>,
        Option<&Boss>,
    )>() {
        let damage = match (bug, boss) {
            (Some(bug), _) => bug.contact_damage,
            (None, Some(boss)) => boss.contact_damage,
            (None, None) => continue,
        };
        if health.hp <= 0.0 || !collides(&player_circle, &Circle::new(*pos, radius.0)) {
            continue;
        }
        if !cooldown_elapsed(cooldown, now_ms) {
            continue;
        }
        let dealt = player.take_damage(damage);
        cooldown.last_hit_ms = Some(now_ms);
        sound_events.push(SoundEvent::PlayerHit);
        trace!(dealt, hp = player.hp, "player hit");
    }
}

/// Consume touching pickups. Returns true if the player can now level up.
fn collect_pickups(
    world: &mut World,
    player: &mut Player,
    sound_events: &mut Vec<SoundEvent>,
    despawn_buffer: &mut Vec<Entity>,
) -> bool {
    let player_circle = Circle::new(player.position, player.radius);
    let mut touched: Vec<(SpawnOrder, Entity, u32)> = world
        .query::<(&Pickup, &Position, &Radius, &SpawnOrder)>()
        .iter()
        .filter(|(_, (pickup, pos, r, _))| {
            pickup.lifetime_ticks > 0 && collides(&player_circle, &Circle::new(**pos, r.0))
        })
        .map(|(e, (pickup, _, _, order))| (*order, e, pickup.xp_value))
        .collect();
    touched.sort_by_key(|(order, _, _)| *order);

    despawn_buffer.clear();
    for (_, entity, xp_value) in &touched {
        despawn_buffer.push(*entity);
        player.gain_xp(*xp_value);
        sound_events.push(SoundEvent::PickupCollected);
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    !touched.is_empty() && player.ready_to_level_up()
}
