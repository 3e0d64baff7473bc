//! Core types and definitions for the BUGSTORM simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, the player model, upgrades, commands, state
//! snapshots, events, constants, and the clock abstraction.
//! It has no dependency on a renderer, audio backend, or ECS runtime.

pub mod clock;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod player;
pub mod state;
pub mod types;
pub mod upgrades;
