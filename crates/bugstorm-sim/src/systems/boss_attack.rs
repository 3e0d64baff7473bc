//! Boss special attacks, paced by the wall clock rather than ticks.

use hecs::World;
use rand::Rng;
use tracing::debug;

use bugstorm_ai::boss_fsm::plan_special_attack;
use bugstorm_core::components::Boss;
use bugstorm_core::types::Position;

use crate::session::SessionState;
use crate::world_setup;

/// Fire the live boss's special attack if its cooldown has elapsed.
/// A boss that has never attacked attacks immediately.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    session: &mut SessionState,
    now_ms: u64,
) {
    let Some(entity) = session.boss else {
        return;
    };

    let (kind, phase, origin) = {
        let Ok(mut boss) = world.get::<&mut Boss>(entity) else {
            return;
        };
        if let Some(last) = boss.last_special_ms {
            if now_ms.saturating_sub(last) < boss.attack_cooldown_ms {
                return;
            }
        }
        boss.last_special_ms = Some(now_ms);
        let Ok(origin) = world.get::<&Position>(entity).map(|p| *p) else {
            return;
        };
        (boss.kind, boss.phase, origin)
    };

    let difficulty = session.difficulty_level;
    let reinforcements = plan_special_attack(kind, phase, origin, difficulty, rng);
    debug!(?kind, count = reinforcements.len(), "boss special attack");
    for r in reinforcements {
        world_setup::spawn_bug(world, session, r.kind, r.position, r.difficulty);
    }
}
