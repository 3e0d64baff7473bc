//! Cleanup system: removes spent projectiles and expired pickups.

use hecs::{Entity, World};

use bugstorm_core::components::{Pickup, Projectile};

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.dead {
            despawn_buffer.push(entity);
        }
    }

    for (entity, pickup) in world.query_mut::<&Pickup>() {
        if pickup.lifetime_ticks == 0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
