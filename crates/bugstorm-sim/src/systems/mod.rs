//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` plus whichever pieces of
//! engine state they need. They run in a fixed order set by the engine.

pub mod auto_attack;
pub mod boss_attack;
pub mod cleanup;
pub mod combat;
pub mod difficulty;
pub mod movement;
pub mod player;
pub mod progression;
pub mod snapshot;
pub mod spawner;
