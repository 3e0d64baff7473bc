//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the player, session state,
//! the seeded RNG and the clock. It processes commands at tick boundaries,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use bugstorm_core::clock::{Clock, MonotonicClock};
use bugstorm_core::commands::{InputState, PlayerCommand};
use bugstorm_core::constants::{TICK_RATE, WORLD_HEIGHT, WORLD_WIDTH};
use bugstorm_core::enums::GamePhase;
use bugstorm_core::events::SoundEvent;
use bugstorm_core::player::Player;
use bugstorm_core::state::GameStateSnapshot;
use bugstorm_core::types::{Position, SimTime};
use bugstorm_core::upgrades::Upgrade;

use crate::session::SessionState;
use crate::systems;
use crate::systems::snapshot::SnapshotContext;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and clock readings = same simulation.
    pub seed: u64,
    pub width: f64,
    pub height: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    config: SimConfig,
    rng: ChaCha8Rng,
    clock: Box<dyn Clock>,
    player: Player,
    session: SessionState,
    input: InputState,
    sound_enabled: bool,
    sound_toggled: bool,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    sound_events: Vec<SoundEvent>,
}

impl SimulationEngine {
    /// Create a new engine timed by the real monotonic clock.
    pub fn new(config: SimConfig) -> Self {
        Self::with_clock(config, MonotonicClock::new())
    }

    /// Create a new engine with an injected clock.
    pub fn with_clock(config: SimConfig, clock: impl Clock + 'static) -> Self {
        let player = Player::new(Self::spawn_point(&config));
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            clock: Box::new(clock),
            player,
            session: SessionState::default(),
            input: InputState::default(),
            sound_enabled: true,
            sound_toggled: false,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            sound_events: Vec::new(),
        }
    }

    fn spawn_point(config: &SimConfig) -> Position {
        Position::new(config.width / 2.0, config.height / 2.0)
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            self.run_systems();
            self.time.advance();
        }

        self.snapshot()
    }

    /// Build a snapshot of the current state, draining pending sound events.
    pub fn snapshot(&mut self) -> GameStateSnapshot {
        let sound_events = std::mem::take(&mut self.sound_events);
        let ctx = SnapshotContext {
            time: &self.time,
            phase: self.phase,
            sound_enabled: self.sound_enabled,
            sound_toggled: self.sound_toggled,
            player: &self.player,
            session: &self.session,
        };
        systems::snapshot::build_snapshot(&self.world, &ctx, sound_events)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Current reading of the clock that times cooldowns.
    pub fn clock_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn pending_offers(&self) -> &[Upgrade] {
        &self.session.pending_offers
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[cfg(test)]
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// Spawn a bug at a fixed position (for tests).
    #[cfg(test)]
    pub fn spawn_test_bug(
        &mut self,
        kind: bugstorm_core::enums::BugKind,
        position: Position,
    ) -> hecs::Entity {
        crate::world_setup::spawn_bug(&mut self.world, &mut self.session, kind, position, 1)
    }

    /// Spawn a boss and register it as the live boss (for tests).
    #[cfg(test)]
    pub fn spawn_test_boss(&mut self, kind: bugstorm_core::enums::BossKind) -> hecs::Entity {
        let width = self.config.width;
        let entity =
            crate::world_setup::spawn_boss(&mut self.world, &mut self.session, kind, width, 1);
        self.session.boss = Some(entity);
        self.session.boss_spawned = true;
        entity
    }

    /// Spawn a projectile (for tests).
    #[cfg(test)]
    pub fn spawn_test_projectile(
        &mut self,
        position: Position,
        angle: f64,
        damage: f64,
        archetype: bugstorm_core::enums::Archetype,
    ) -> hecs::Entity {
        crate::world_setup::spawn_projectile(
            &mut self.world,
            &mut self.session,
            position,
            angle,
            damage,
            archetype,
        )
    }

    /// Spawn a pickup (for tests).
    #[cfg(test)]
    pub fn spawn_test_pickup(&mut self, position: Position, xp_value: u32) -> hecs::Entity {
        crate::world_setup::spawn_pickup(&mut self.world, &mut self.session, position, xp_value)
    }

    /// Run only the combat pass (for tests).
    #[cfg(test)]
    pub fn run_combat(&mut self) -> systems::combat::CombatOutcome {
        let now = self.clock.now_ms();
        systems::combat::run(
            &mut self.world,
            &mut self.session,
            &mut self.player,
            now,
            &mut self.sound_events,
            &mut self.despawn_buffer,
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                self.reset_session();
                self.phase = GamePhase::Playing;
                info!(seed = self.config.seed, "session started");
            }
            PlayerCommand::ToggleSound => {
                self.sound_enabled = !self.sound_enabled;
                self.sound_toggled = true;
                debug!(enabled = self.sound_enabled, "sound toggled");
            }
            PlayerCommand::SetInput {
                up,
                down,
                left,
                right,
            } => {
                self.input = InputState {
                    up,
                    down,
                    left,
                    right,
                };
            }
            PlayerCommand::ChooseUpgrade { index } => self.choose_upgrade(index),
        }
    }

    fn choose_upgrade(&mut self, index: usize) {
        if self.phase != GamePhase::LevelUp {
            warn!(index, phase = ?self.phase, "upgrade chosen outside level-up, ignored");
            return;
        }
        let Some(upgrade) = self.session.pending_offers.get(index).copied() else {
            warn!(
                index,
                offers = self.session.pending_offers.len(),
                "upgrade index out of range, ignored"
            );
            return;
        };

        self.session.pending_offers.clear();
        systems::progression::apply_upgrade(
            &mut self.world,
            &mut self.player,
            &mut self.session,
            upgrade,
        );
        self.phase = GamePhase::Playing;

        // Retained xp may already cover the next threshold.
        if systems::progression::begin_level_up(
            &mut self.player,
            &mut self.session,
            &mut self.rng,
            &mut self.sound_events,
        ) {
            self.phase = GamePhase::LevelUp;
        }
    }

    /// Discard the world and session, keeping config, RNG stream and sound flag.
    fn reset_session(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.player = Player::new(Self::spawn_point(&self.config));
        self.session = SessionState::default();
        self.input = InputState::default();
        self.despawn_buffer.clear();
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.clock.now_ms();
        let (width, height) = (self.config.width, self.config.height);

        // 1. Difficulty and adaptive scalar
        systems::difficulty::run(&mut self.session, &self.player, &self.time);
        // 2. Boss trigger
        systems::spawner::run_boss_trigger(
            &mut self.world,
            &mut self.session,
            &self.player,
            width,
            &mut self.sound_events,
        );
        // 3. Player movement
        systems::player::run(&mut self.player, &self.input, width, height);
        // 4. Bug spawning
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.session,
            &self.player,
            &self.time,
            width,
            height,
        );
        // 5. Entity movement
        systems::movement::run(
            &mut self.world,
            &mut self.rng,
            self.player.position,
            width,
            height,
        );
        // 6. Boss special attacks
        systems::boss_attack::run(&mut self.world, &mut self.rng, &mut self.session, now);
        // 7. Auto-attack
        systems::auto_attack::run(
            &mut self.world,
            &mut self.rng,
            &mut self.session,
            &mut self.player,
            now,
            &mut self.sound_events,
        );
        // 8. Combat
        let outcome = systems::combat::run(
            &mut self.world,
            &mut self.session,
            &mut self.player,
            now,
            &mut self.sound_events,
            &mut self.despawn_buffer,
        );
        if outcome.level_up
            && systems::progression::begin_level_up(
                &mut self.player,
                &mut self.session,
                &mut self.rng,
                &mut self.sound_events,
            )
        {
            self.phase = GamePhase::LevelUp;
        }
        // 9. Boss defeat
        systems::progression::resolve_boss_defeat(
            &mut self.world,
            &mut self.session,
            &self.player,
            &mut self.sound_events,
        );
        // 10. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 11. Terminal conditions
        self.check_terminal();

        if self.time.tick % TICK_RATE as u64 == 0 {
            debug!(
                tick = self.time.tick,
                entities = self.world.len(),
                hp = self.player.hp,
                level = self.player.level,
                kills = self.player.kills,
                "frame"
            );
        }
    }

    fn check_terminal(&mut self) {
        if !self.player.is_alive() {
            self.phase = GamePhase::GameOver;
            self.session.pending_offers.clear();
            self.sound_events.push(SoundEvent::GameOver);
            info!(
                level = self.player.level,
                kills = self.player.kills,
                secs = self.time.elapsed_secs,
                "game over"
            );
        } else if self.session.game_complete {
            self.phase = GamePhase::Victory;
            self.session.pending_offers.clear();
            self.sound_events.push(SoundEvent::Victory);
            info!(
                level = self.player.level,
                kills = self.player.kills,
                secs = self.time.elapsed_secs,
                "victory"
            );
        }
    }
}
