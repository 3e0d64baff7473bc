//! Boss behavior state machine.
//!
//! Regular bosses pursue the player directly. The final boss switches
//! between three movement phases by remaining hp fraction, and every boss
//! periodically summons reinforcements in a kind-specific formation.

use std::f64::consts::TAU;

use bugstorm_core::constants::*;
use bugstorm_core::enums::{BossKind, BugKind};
use bugstorm_core::types::Position;
use rand::Rng;

use crate::pursuit::{step_toward, step_toward_until};

/// Input to the boss FSM for a single tick.
pub struct BossContext {
    pub kind: BossKind,
    pub position: Position,
    pub player_position: Position,
    pub hp_fraction: f64,
    pub speed: f64,
    /// Ticks since spawn, already incremented for this tick.
    pub move_counter: u64,
    pub wander_target: Option<Position>,
    pub world_width: f64,
    pub world_height: f64,
}

/// Output from the boss FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossUpdate {
    pub position: Position,
    pub phase: Option<u8>,
    pub wander_target: Option<Position>,
}

/// A bug to be spawned by a boss special attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reinforcement {
    pub kind: BugKind,
    pub position: Position,
    pub difficulty: u32,
}

/// Final-boss phase for a remaining hp fraction.
pub fn final_boss_phase(hp_fraction: f64) -> u8 {
    if hp_fraction > GIT_BOSS_PHASE_2_FRACTION {
        1
    } else if hp_fraction > GIT_BOSS_PHASE_3_FRACTION {
        2
    } else {
        3
    }
}

/// Advance one boss by one tick.
pub fn evaluate<R: Rng + ?Sized>(ctx: &BossContext, rng: &mut R) -> BossUpdate {
    if !ctx.kind.is_final() {
        return BossUpdate {
            position: step_toward(ctx.position, ctx.player_position, ctx.speed),
            phase: None,
            wander_target: ctx.wander_target,
        };
    }

    let phase = final_boss_phase(ctx.hp_fraction);
    match phase {
        1 => BossUpdate {
            position: step_toward(ctx.position, ctx.player_position, ctx.speed * 0.5),
            phase: Some(1),
            wander_target: ctx.wander_target,
        },
        2 => {
            let retarget = ctx.wander_target.is_none()
                || ctx.move_counter % GIT_BOSS_WANDER_INTERVAL_TICKS == 0;
            let target = match ctx.wander_target {
                Some(t) if !retarget => t,
                _ => Position::new(
                    rng.gen::<f64>() * ctx.world_width,
                    rng.gen::<f64>() * ctx.world_height,
                ),
            };
            BossUpdate {
                position: step_toward_until(
                    ctx.position,
                    target,
                    ctx.speed * 2.0,
                    GIT_BOSS_WANDER_ARRIVAL,
                ),
                phase: Some(2),
                wander_target: Some(target),
            }
        }
        _ => BossUpdate {
            position: step_toward(ctx.position, ctx.player_position, ctx.speed * 3.0),
            phase: Some(3),
            wander_target: ctx.wander_target,
        },
    }
}

/// `count` evenly spaced points on a circle, slot i at angle 2πi/count.
fn ring(origin: Position, count: usize, radius: f64) -> impl Iterator<Item = Position> {
    (0..count).map(move |i| origin.offset_polar(TAU * i as f64 / count as f64, radius))
}

fn scaled(difficulty: u32, factor: f64) -> u32 {
    (difficulty as f64 * factor).floor() as u32
}

/// Plan the reinforcements for one special attack.
pub fn plan_special_attack<R: Rng + ?Sized>(
    kind: BossKind,
    phase: Option<u8>,
    origin: Position,
    difficulty: u32,
    rng: &mut R,
) -> Vec<Reinforcement> {
    let uniform = |kind: BugKind, count: usize, radius: f64, difficulty: u32| {
        ring(origin, count, radius)
            .map(|position| Reinforcement {
                kind,
                position,
                difficulty,
            })
            .collect::<Vec<_>>()
    };

    match kind {
        BossKind::SyntaxBoss => uniform(BugKind::SyntaxError, 2, 60.0, scaled(difficulty, 0.5)),
        BossKind::LogicBoss => uniform(BugKind::LogicBug, 3, 80.0, scaled(difficulty, 0.7)),
        BossKind::MemoryBoss => {
            let position = Position::new(
                origin.x + (rng.gen::<f64>() - 0.5) * 100.0,
                origin.y + (rng.gen::<f64>() - 0.5) * 100.0,
            );
            vec![Reinforcement {
                kind: BugKind::MemoryLeak,
                position,
                difficulty,
            }]
        }
        BossKind::NetworkBoss => uniform(BugKind::NullPointer, 4, 100.0, scaled(difficulty, 0.8)),
        BossKind::SecurityBoss => (0..2)
            .map(|_| {
                let angle = rng.gen::<f64>() * TAU;
                let kind = if rng.gen_bool(0.5) {
                    BugKind::MemoryLeak
                } else {
                    BugKind::LogicBug
                };
                Reinforcement {
                    kind,
                    position: origin.offset_polar(angle, 70.0),
                    difficulty,
                }
            })
            .collect(),
        BossKind::GitBoss => match phase.unwrap_or(1) {
            1 => uniform(BugKind::SyntaxError, 2, 80.0, difficulty),
            2 => {
                let kinds = [BugKind::SyntaxError, BugKind::LogicBug, BugKind::NullPointer];
                ring(origin, 3, 90.0)
                    .zip(kinds)
                    .map(|(position, kind)| Reinforcement {
                        kind,
                        position,
                        difficulty,
                    })
                    .collect()
            }
            _ => uniform(BugKind::MemoryLeak, 4, 100.0, difficulty),
        },
    }
}
