//! Movement system: advances bugs, the boss, projectiles and pickups by one tick.

use hecs::World;
use rand::Rng;

use bugstorm_ai::boss_fsm::{self, BossContext};
use bugstorm_ai::pursuit::step_toward;
use bugstorm_core::components::{Boss, Bug, Health, Pickup, Projectile};
use bugstorm_core::types::Position;

/// Advance every moving entity.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    player_position: Position,
    width: f64,
    height: f64,
) {
    move_bugs(world, player_position);
    move_boss(world, rng, player_position, width, height);
    move_projectiles(world);
    move_pickups(world, player_position);
}

fn move_bugs(world: &mut World, target: Position) {
    for (_entity, (pos, bug)) in world.query_mut::<(&mut Position, &Bug)>() {
        *pos = step_toward(*pos, target, bug.speed);
    }
}

fn move_boss<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    target: Position,
    width: f64,
    height: f64,
) {
    for (_entity, (pos, boss, health)) in world.query_mut::<(&mut Position, &mut Boss, &Health)>()
    {
        boss.move_counter += 1;
        let ctx = BossContext {
            kind: boss.kind,
            position: *pos,
            player_position: target,
            hp_fraction: health.hp / health.max_hp,
            speed: boss.speed,
            move_counter: boss.move_counter,
            wander_target: boss.wander_target,
            world_width: width,
            world_height: height,
        };
        let update = boss_fsm::evaluate(&ctx, rng);
        *pos = update.position;
        boss.phase = update.phase;
        boss.wander_target = update.wander_target;
    }
}

fn move_projectiles(world: &mut World) {
    for (_entity, (pos, projectile)) in world.query_mut::<(&mut Position, &mut Projectile)>() {
        pos.x += projectile.angle.cos() * projectile.speed;
        pos.y += projectile.angle.sin() * projectile.speed;
        projectile.lifetime_ticks = projectile.lifetime_ticks.saturating_sub(1);
        if projectile.lifetime_ticks == 0 {
            projectile.dead = true;
        }
    }
}

fn move_pickups(world: &mut World, target: Position) {
    for (_entity, (pos, pickup)) in world.query_mut::<(&mut Position, &mut Pickup)>() {
        if pos.distance_to(&target) < pickup.magnet_radius {
            *pos = step_toward(*pos, target, pickup.homing_speed);
        }
        pickup.lifetime_ticks = pickup.lifetime_ticks.saturating_sub(1);
    }
}
