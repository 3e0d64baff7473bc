//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

/// Fire-and-forget notifications. None of them feed back into the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEvent {
    /// A weapon volley left the player.
    Shoot,
    EnemyDeath,
    PickupCollected,
    LevelUp,
    PlayerHit,
    BossAppear,
    BossDefeated,
    GameOver,
    Victory,
}
