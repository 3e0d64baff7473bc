//! The external collaborators the loop talks to.
//!
//! Neither trait can affect the simulation: the renderer only reads the
//! snapshot and the notifier is fire-and-forget.

use tracing::{debug, trace};

use bugstorm_core::enums::GamePhase;
use bugstorm_core::events::SoundEvent;
use bugstorm_core::state::GameStateSnapshot;

/// Draws one frame from the current snapshot.
pub trait Renderer {
    fn draw(&mut self, snapshot: &GameStateSnapshot);
}

/// Receives sound and UI notifications.
pub trait Notifier {
    fn notify(&mut self, event: SoundEvent);

    /// Called whenever the sound flag changes.
    fn set_sound_enabled(&mut self, _enabled: bool) {}
}

/// Renderer for the headless binary. Logs a line whenever the phase changes.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    last_phase: Option<GamePhase>,
    frames: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for HeadlessRenderer {
    fn draw(&mut self, snapshot: &GameStateSnapshot) {
        self.frames += 1;
        if self.last_phase != Some(snapshot.phase) {
            debug!(
                phase = ?snapshot.phase,
                tick = snapshot.time.tick,
                level = snapshot.player.level,
                hp = snapshot.player.hp,
                "phase changed"
            );
            self.last_phase = Some(snapshot.phase);
        }
        trace!(
            tick = snapshot.time.tick,
            bugs = snapshot.bugs.len(),
            projectiles = snapshot.projectiles.len(),
            pickups = snapshot.pickups.len(),
            "frame"
        );
    }
}

/// Notifier that writes events to the log instead of playing them.
#[derive(Debug)]
pub struct LogNotifier {
    enabled: bool,
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for LogNotifier {
    fn notify(&mut self, event: SoundEvent) {
        if self.enabled {
            trace!(?event, "sound");
        }
    }

    fn set_sound_enabled(&mut self, enabled: bool) {
        debug!(enabled, "sound toggled");
        self.enabled = enabled;
    }
}
