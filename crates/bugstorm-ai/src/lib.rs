//! Enemy AI for BUGSTORM.
//!
//! Pure decision functions with no ECS dependency: stat tables scaled by
//! difficulty, pursuit steering, the boss movement state machine and
//! special-attack formations, skill-biased spawn selection, and the
//! adaptive difficulty curve.

pub mod boss_fsm;
pub mod difficulty;
pub mod profiles;
pub mod pursuit;
pub mod spawn_weights;

pub use bugstorm_core as core;

#[cfg(test)]
mod tests;
