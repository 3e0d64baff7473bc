//! Auto-attack system: every owned weapon fires on its own cooldown.
//!
//! Weapons aim at a target chosen by archetype. With nothing in range they
//! fire in a random direction so pressure stays constant.

use std::f64::consts::TAU;

use hecs::World;
use rand::Rng;

use bugstorm_core::components::{Boss, Bug, SpawnOrder};
use bugstorm_core::constants::*;
use bugstorm_core::enums::Archetype;
use bugstorm_core::events::SoundEvent;
use bugstorm_core::player::Player;
use bugstorm_core::types::Position;

use crate::session::SessionState;
use crate::world_setup;

/// Candidate targets: bugs in spawn order, then the boss.
fn collect_targets(world: &World) -> Vec<Position> {
    let mut bugs: Vec<(SpawnOrder, Position)> = world
        .query::<(&Bug, &Position, &SpawnOrder)>()
        .iter()
        .map(|(_, (_, pos, order))| (*order, *pos))
        .collect();
    bugs.sort_by_key(|(order, _)| *order);

    let mut targets: Vec<Position> = bugs.into_iter().map(|(_, pos)| pos).collect();
    targets.extend(
        world
            .query::<(&Boss, &Position)>()
            .iter()
            .map(|(_, (_, pos))| *pos),
    );
    targets
}

/// Pick the aim point for one archetype.
pub fn select_target(
    archetype: Archetype,
    origin: Position,
    range: f64,
    targets: &[Position],
) -> Option<Position> {
    match archetype {
        Archetype::Single | Archetype::Area => {
            let mut best: Option<(f64, Position)> = None;
            for t in targets {
                let d = origin.distance_to(t);
                if d < best.map_or(range, |(bd, _)| bd) {
                    best = Some((d, *t));
                }
            }
            best.map(|(_, t)| t)
        }
        Archetype::Spread => targets.iter().copied().find(|t| origin.distance_to(t) < range),
        Archetype::Piercing => targets
            .iter()
            .copied()
            .find(|t| origin.distance_to(t) < range * PIERCING_RANGE_FACTOR),
    }
}

/// Fire every ready weapon.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    session: &mut SessionState,
    player: &mut Player,
    now_ms: u64,
    sound_events: &mut Vec<SoundEvent>,
) {
    let targets = collect_targets(world);
    let origin = player.position;
    let attack_speed = player.attack_speed;
    let range = player.attack_range;
    let multiplier = player.damage_multiplier;

    for weapon in player.weapons.iter_mut() {
        if !weapon.is_ready(now_ms, attack_speed) {
            continue;
        }
        let archetype = weapon.archetype();
        let angle = match select_target(archetype, origin, range, &targets) {
            Some(target) => origin.angle_to(&target),
            None => rng.gen::<f64>() * TAU,
        };
        let damage = weapon.damage * multiplier;

        if archetype == Archetype::Spread {
            for offset in [-SPREAD_ANGLE, 0.0, SPREAD_ANGLE] {
                world_setup::spawn_projectile(
                    world,
                    session,
                    origin,
                    angle + offset,
                    damage * SPREAD_DAMAGE_FACTOR,
                    archetype,
                );
            }
        } else {
            world_setup::spawn_projectile(world, session, origin, angle, damage, archetype);
        }

        weapon.last_fired_ms = Some(now_ms);
        sound_events.push(SoundEvent::Shoot);
    }
}
