//! BUGSTORM host shell.
//!
//! Wires the headless simulation to its external collaborators: a
//! frame-paced loop, the `Renderer` and `Notifier` traits, and the
//! key-value store that keeps session analytics between runs.

pub mod config;
pub mod error;
pub mod frontend;
pub mod game_loop;
pub mod persistence;

pub use bugstorm_core as core;
