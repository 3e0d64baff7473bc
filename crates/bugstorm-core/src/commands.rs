//! Commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All externally triggered actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a fresh session from any phase, discarding all state.
    StartGame,
    /// Flip the sound flag. The notifier decides what it means.
    ToggleSound,
    /// Replace the held movement intents.
    SetInput {
        up: bool,
        down: bool,
        left: bool,
        right: bool,
    },
    /// Pick one of the pending level-up offers.
    ChooseUpgrade { index: usize },
}

/// Movement intents sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// Unnormalized direction from the held keys, each axis in {-1, 0, 1}.
    pub fn axes(&self) -> (f64, f64) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.up {
            dy -= 1.0;
        }
        if self.down {
            dy += 1.0;
        }
        if self.left {
            dx -= 1.0;
        }
        if self.right {
            dx += 1.0;
        }
        (dx, dy)
    }
}
