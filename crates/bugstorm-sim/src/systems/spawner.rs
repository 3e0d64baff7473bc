//! Spawner system: periodic bug spawns and boss triggers.

use hecs::World;
use rand::Rng;
use tracing::{debug, info};

use bugstorm_ai::spawn_weights::{choose_bug_kind, player_skill};
use bugstorm_core::components::Bug;
use bugstorm_core::enums::BossKind;
use bugstorm_core::events::SoundEvent;
use bugstorm_core::player::Player;
use bugstorm_core::types::SimTime;

use crate::session::SessionState;
use crate::world_setup;

/// Count the spawn interval down and inject one edge bug when it elapses and
/// the live population is under the cap.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    session: &mut SessionState,
    player: &Player,
    time: &SimTime,
    width: f64,
    height: f64,
) {
    session.spawn_counter += 1;
    if (session.spawn_counter as f64) < session.spawn_interval {
        return;
    }

    let live = world.query::<&Bug>().iter().count();
    if live as f64 >= session.population_cap {
        return;
    }

    let skill = player_skill(player.kills, time.elapsed_secs);
    let kind = choose_bug_kind(rng, skill);
    let position = world_setup::edge_spawn_point(rng, width, height);
    let difficulty = session.difficulty_level;
    world_setup::spawn_bug(world, session, kind, position, difficulty);
    session.spawn_counter = 0;
    debug!(?kind, live = live + 1, "bug spawned");
}

/// Spawn the boss for the next threshold once the player reaches it.
pub fn run_boss_trigger(
    world: &mut World,
    session: &mut SessionState,
    player: &Player,
    width: f64,
    sound_events: &mut Vec<SoundEvent>,
) {
    if session.game_complete
        || session.boss_spawned
        || session.boss.is_some()
        || player.level < session.next_boss_level
    {
        return;
    }
    let Some(kind) = BossKind::for_threshold(session.next_boss_level) else {
        return;
    };

    let difficulty = session.difficulty_level;
    let entity = world_setup::spawn_boss(world, session, kind, width, difficulty);
    session.boss = Some(entity);
    session.boss_spawned = true;
    sound_events.push(SoundEvent::BossAppear);
    info!(boss = kind.display_name(), level = player.level, "boss appeared");
}
