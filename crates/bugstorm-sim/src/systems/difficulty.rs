//! Difficulty system: time-driven level plus the adaptive performance scalar.

use tracing::debug;

use bugstorm_ai::difficulty::{
    adjust_scalar, kills_per_second, level_for_elapsed, population_cap, spawn_interval,
};
use bugstorm_core::player::Player;
use bugstorm_core::types::SimTime;

use crate::session::SessionState;

/// Update the scalar, level, population cap and spawn interval for this tick.
pub fn run(session: &mut SessionState, player: &Player, time: &SimTime) {
    let kps = kills_per_second(player.kills, time.elapsed_secs);
    session.ai_adjustment = adjust_scalar(session.ai_adjustment, player.hp_fraction(), kps);

    let level = level_for_elapsed(time.elapsed_secs);
    if level > session.difficulty_level {
        session.difficulty_level = level;
        debug!(level, "difficulty increased");
    }

    let effective = session.effective_difficulty();
    session.population_cap = population_cap(effective);
    session.spawn_interval = spawn_interval(effective, session.difficulty_level);
}
