//! Frame-paced host loop.
//!
//! Ticks the engine, hands each snapshot to the renderer, forwards sound
//! events to the notifier, and records session analytics when a session
//! ends. The engine stays headless; everything outward-facing lives here.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use bugstorm_core::clock::ManualClock;
use bugstorm_core::commands::PlayerCommand;
use bugstorm_core::constants::TICK_RATE;
use bugstorm_core::enums::GamePhase;
use bugstorm_core::state::GameStateSnapshot;
use bugstorm_sim::SimulationEngine;

use crate::config::AppConfig;
use crate::frontend::{Notifier, Renderer};
use crate::persistence::{record_session, KeyValueStore, SessionAnalytics};

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Ticks between direction changes of the autopilot.
const AUTOPILOT_LEG_TICKS: u64 = 90;

/// Scripted input for the headless binary: starts the game, strafes in a
/// diamond, and always takes the first upgrade offer.
#[derive(Debug, Default)]
pub struct Autopilot {
    leg: usize,
}

impl Autopilot {
    const LEGS: [PlayerCommand; 4] = [
        PlayerCommand::SetInput {
            up: true,
            down: false,
            left: false,
            right: true,
        },
        PlayerCommand::SetInput {
            up: false,
            down: true,
            left: false,
            right: true,
        },
        PlayerCommand::SetInput {
            up: false,
            down: true,
            left: true,
            right: false,
        },
        PlayerCommand::SetInput {
            up: true,
            down: false,
            left: true,
            right: false,
        },
    ];

    /// Commands to queue before the next tick.
    pub fn commands(&mut self, phase: GamePhase, tick: u64) -> Vec<PlayerCommand> {
        match phase {
            GamePhase::Title => vec![PlayerCommand::StartGame],
            GamePhase::LevelUp => vec![PlayerCommand::ChooseUpgrade { index: 0 }],
            GamePhase::Playing if tick % AUTOPILOT_LEG_TICKS == 0 => {
                let command = Self::LEGS[self.leg].clone();
                self.leg = (self.leg + 1) % Self::LEGS.len();
                vec![command]
            }
            _ => Vec::new(),
        }
    }
}

/// Clock advanced by exactly one tick per frame, for unpaced runs.
///
/// Cooldowns then see the same time the simulation does, however fast the
/// host spins.
#[derive(Debug, Clone)]
pub struct SteppedClock {
    clock: ManualClock,
    elapsed: Duration,
}

impl SteppedClock {
    pub fn new(clock: ManualClock) -> Self {
        clock.set(0);
        Self {
            clock,
            elapsed: Duration::ZERO,
        }
    }

    fn advance(&mut self) {
        self.elapsed += TICK_DURATION;
        self.clock.set(self.elapsed.as_millis() as u64);
    }
}

/// Owns the engine and its external collaborators.
pub struct GameLoop<R, N, S> {
    engine: SimulationEngine,
    renderer: R,
    notifier: N,
    store: S,
    autopilot: Option<Autopilot>,
    stepped_clock: Option<SteppedClock>,
    last_phase: GamePhase,
    sound_enabled: Option<bool>,
    start_pending: bool,
    session_start_ms: u64,
    last_analytics: Option<SessionAnalytics>,
}

impl<R: Renderer, N: Notifier, S: KeyValueStore> GameLoop<R, N, S> {
    pub fn new(engine: SimulationEngine, renderer: R, notifier: N, store: S) -> Self {
        let last_phase = engine.phase();
        Self {
            engine,
            renderer,
            notifier,
            store,
            autopilot: None,
            stepped_clock: None,
            last_phase,
            sound_enabled: None,
            start_pending: false,
            session_start_ms: 0,
            last_analytics: None,
        }
    }

    /// Build the engine and loop a config describes.
    ///
    /// Paced runs time cooldowns on the real monotonic clock. Unpaced runs
    /// get a `SteppedClock` so a tick always spans one tick of clock time.
    pub fn from_config(config: &AppConfig, renderer: R, notifier: N, store: S) -> Self {
        let game = if config.realtime {
            let engine = SimulationEngine::new(config.sim_config());
            Self::new(engine, renderer, notifier, store)
        } else {
            let clock = ManualClock::new(0);
            let engine = SimulationEngine::with_clock(config.sim_config(), clock.clone());
            Self::new(engine, renderer, notifier, store)
                .with_stepped_clock(SteppedClock::new(clock))
        };
        game.with_autopilot(config.autopilot)
    }

    pub fn with_autopilot(mut self, enabled: bool) -> Self {
        self.autopilot = enabled.then(Autopilot::default);
        self
    }

    /// Advance `clock` by one tick after every frame. It must be the
    /// engine's clock.
    pub fn with_stepped_clock(mut self, clock: SteppedClock) -> Self {
        self.stepped_clock = Some(clock);
        self
    }

    pub fn queue_command(&mut self, command: PlayerCommand) {
        if command == PlayerCommand::StartGame {
            self.start_pending = true;
        }
        self.engine.queue_command(command);
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Analytics from the most recent successful write, if any.
    pub fn last_analytics(&self) -> Option<&SessionAnalytics> {
        self.last_analytics.as_ref()
    }

    /// Advance one frame.
    pub fn step(&mut self) -> GameStateSnapshot {
        if let Some(autopilot) = self.autopilot.as_mut() {
            let commands = autopilot.commands(self.engine.phase(), self.engine.time().tick);
            for command in commands {
                self.queue_command(command);
            }
        }

        if std::mem::take(&mut self.start_pending) {
            self.session_start_ms = self.engine.clock_ms();
        }
        let snapshot = self.engine.tick();
        if let Some(clock) = self.stepped_clock.as_mut() {
            clock.advance();
        }

        self.dispatch(&snapshot);
        snapshot
    }

    /// Hand a fresh snapshot to the collaborators and record a finished session.
    fn dispatch(&mut self, snapshot: &GameStateSnapshot) {
        if self.sound_enabled != Some(snapshot.sound_enabled) {
            self.notifier.set_sound_enabled(snapshot.sound_enabled);
            self.sound_enabled = Some(snapshot.sound_enabled);
        }
        for &event in &snapshot.sound_events {
            self.notifier.notify(event);
        }
        self.renderer.draw(snapshot);

        if snapshot.phase == GamePhase::GameOver && self.last_phase != GamePhase::GameOver {
            self.persist(snapshot);
        }
        self.last_phase = snapshot.phase;
    }

    /// Run until the session ends or `max_ticks` frames have passed.
    ///
    /// With `realtime` set, sleeps to hold the nominal tick rate and drops
    /// the backlog instead of spiralling when it falls too far behind.
    pub fn run(&mut self, max_ticks: u64, realtime: bool) -> Option<GameStateSnapshot> {
        let mut next_tick_time = Instant::now();
        let mut last = None;

        for frame in 0..max_ticks {
            let snapshot = self.step();
            let finished = snapshot.phase.is_terminal();
            last = Some(snapshot);
            if finished {
                debug!(frame, "session finished");
                break;
            }

            if realtime {
                next_tick_time += TICK_DURATION;
                let now = Instant::now();
                if next_tick_time > now {
                    std::thread::sleep(next_tick_time - now);
                } else if now - next_tick_time > TICK_DURATION * 2 {
                    next_tick_time = now;
                }
            }
        }

        last
    }

    fn persist(&mut self, snapshot: &GameStateSnapshot) {
        let play_time_ms = self.engine.clock_ms().saturating_sub(self.session_start_ms);
        match record_session(&mut self.store, snapshot, play_time_ms) {
            Ok(analytics) => self.last_analytics = Some(analytics),
            Err(e) => warn!(error = %e, "failed to record session, continuing"),
        }
        info!(
            level = snapshot.player.level,
            kills = snapshot.player.kills,
            play_time_ms,
            "session ended"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use bugstorm_core::events::SoundEvent;
    use bugstorm_sim::SimConfig;

    use crate::error::StoreError;
    use crate::persistence::{read_session_count, MemoryStore, ANALYTICS_KEY};

    #[derive(Default)]
    struct RecordingRenderer {
        phases: Vec<GamePhase>,
    }

    impl Renderer for RecordingRenderer {
        fn draw(&mut self, snapshot: &GameStateSnapshot) {
            self.phases.push(snapshot.phase);
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        events: Vec<SoundEvent>,
        sound_flags: Vec<bool>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, event: SoundEvent) {
            self.events.push(event);
        }

        fn set_sound_enabled(&mut self, enabled: bool) {
            self.sound_flags.push(enabled);
        }
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(io::Error::other("disk full")))
        }
    }

    /// A frozen clock lets every bug land exactly one hit and every weapon
    /// fire exactly once, so an idle player is guaranteed to go down.
    fn frozen_loop<S: KeyValueStore>(
        store: S,
    ) -> GameLoop<RecordingRenderer, RecordingNotifier, S> {
        let engine = SimulationEngine::with_clock(SimConfig::default(), ManualClock::new(0));
        GameLoop::new(
            engine,
            RecordingRenderer::default(),
            RecordingNotifier::default(),
            store,
        )
    }

    fn play_until_over<S: KeyValueStore>(
        game: &mut GameLoop<RecordingRenderer, RecordingNotifier, S>,
    ) -> GameStateSnapshot {
        game.queue_command(PlayerCommand::StartGame);
        let last = game.run(20_000, false).unwrap();
        assert_eq!(last.phase, GamePhase::GameOver);
        last
    }

    #[test]
    fn renderer_sees_every_frame() {
        let mut game = frozen_loop(MemoryStore::new());
        for _ in 0..5 {
            game.step();
        }
        assert_eq!(game.renderer().phases, vec![GamePhase::Title; 5]);

        game.queue_command(PlayerCommand::StartGame);
        game.step();
        assert_eq!(game.renderer().phases.last(), Some(&GamePhase::Playing));
    }

    #[test]
    fn sound_flag_is_synced_on_change_only() {
        let mut game = frozen_loop(MemoryStore::new());
        game.step();
        game.step();
        game.queue_command(PlayerCommand::ToggleSound);
        game.step();
        game.step();
        assert_eq!(game.notifier().sound_flags, vec![true, false]);
    }

    #[test]
    fn game_over_is_recorded_once() {
        let mut game = frozen_loop(MemoryStore::new());
        let last = play_until_over(&mut game);

        for _ in 0..30 {
            assert_eq!(game.step().phase, GamePhase::GameOver);
        }

        assert_eq!(read_session_count(game.store()), 1);
        assert!(game.store().get(ANALYTICS_KEY).is_some());
        let analytics = game.last_analytics().unwrap();
        assert_eq!(analytics.sessions_count, 0);
        assert_eq!(analytics.kills, last.player.kills);
        assert_eq!(analytics.max_level, last.player.level);

        let game_overs = game
            .notifier()
            .events
            .iter()
            .filter(|&&e| e == SoundEvent::GameOver)
            .count();
        assert_eq!(game_overs, 1);
        assert!(game.notifier().events.contains(&SoundEvent::PlayerHit));
    }

    #[test]
    fn restart_records_a_second_session() {
        let mut game = frozen_loop(MemoryStore::new());
        play_until_over(&mut game);
        play_until_over(&mut game);
        assert_eq!(read_session_count(game.store()), 2);
        assert_eq!(game.last_analytics().unwrap().sessions_count, 1);
    }

    #[test]
    fn store_failure_does_not_stop_the_loop() {
        let mut game = frozen_loop(FailingStore);
        play_until_over(&mut game);
        assert!(game.last_analytics().is_none());
        assert_eq!(game.step().phase, GamePhase::GameOver);

        game.queue_command(PlayerCommand::StartGame);
        assert_eq!(game.step().phase, GamePhase::Playing);
    }

    #[test]
    fn autopilot_starts_and_steers() {
        let mut autopilot = Autopilot::default();
        assert_eq!(
            autopilot.commands(GamePhase::Title, 0),
            vec![PlayerCommand::StartGame]
        );
        assert_eq!(
            autopilot.commands(GamePhase::LevelUp, 17),
            vec![PlayerCommand::ChooseUpgrade { index: 0 }]
        );
        assert!(autopilot.commands(GamePhase::GameOver, 0).is_empty());
        assert!(autopilot.commands(GamePhase::Playing, 1).is_empty());

        let first = autopilot.commands(GamePhase::Playing, 0);
        let second = autopilot.commands(GamePhase::Playing, AUTOPILOT_LEG_TICKS);
        assert_eq!(first.len(), 1);
        assert_ne!(first, second);
    }

    #[test]
    fn autopilot_loop_leaves_title() {
        let mut game = frozen_loop(MemoryStore::new()).with_autopilot(true);
        game.run(600, false);

        assert_eq!(game.renderer().phases[0], GamePhase::Playing);
        assert!(game.engine().time().tick > 0);
        assert!(!game.renderer().phases.contains(&GamePhase::Title));
    }

    fn configured_loop(
        config: &AppConfig,
    ) -> GameLoop<RecordingRenderer, RecordingNotifier, MemoryStore> {
        GameLoop::from_config(
            config,
            RecordingRenderer::default(),
            RecordingNotifier::default(),
            MemoryStore::new(),
        )
    }

    fn stepped_ms(frames: u32) -> u64 {
        (TICK_DURATION * frames).as_millis() as u64
    }

    #[test]
    fn default_unpaced_run_keeps_weapons_firing() {
        let config = AppConfig::default();
        assert!(!config.realtime);
        let mut game = configured_loop(&config);

        let last = game.run(3600, false).unwrap();
        assert!(last.player.kills > 0, "no kills in {} ticks", last.time.tick);

        let frames = game.renderer().phases.len() as u32;
        assert_eq!(game.engine().clock_ms(), stepped_ms(frames));
        let shots = game
            .notifier()
            .events
            .iter()
            .filter(|&&e| e == SoundEvent::Shoot)
            .count();
        assert!(shots > 10);
    }

    #[test]
    fn victory_is_not_recorded() {
        let mut game = frozen_loop(MemoryStore::new());
        let victory = GameStateSnapshot {
            phase: GamePhase::Victory,
            ..Default::default()
        };
        game.dispatch(&victory);
        assert_eq!(read_session_count(game.store()), 0);
        assert!(game.last_analytics().is_none());

        let over = GameStateSnapshot {
            phase: GamePhase::GameOver,
            ..Default::default()
        };
        game.dispatch(&over);
        assert_eq!(read_session_count(game.store()), 1);
    }

    #[test]
    fn play_time_follows_the_cooldown_clock() {
        let config = AppConfig {
            autopilot: false,
            ..AppConfig::default()
        };
        let mut game = configured_loop(&config);

        game.queue_command(PlayerCommand::StartGame);
        let mut over = game.step();
        for _ in 0..120 {
            over = game.step();
        }
        over.phase = GamePhase::GameOver;
        game.dispatch(&over);
        assert_eq!(
            game.last_analytics().unwrap().total_play_time_ms,
            stepped_ms(121)
        );

        // A restart measures from its own start.
        game.queue_command(PlayerCommand::StartGame);
        let mut over = game.step();
        for _ in 0..59 {
            over = game.step();
        }
        over.phase = GamePhase::GameOver;
        game.dispatch(&over);
        assert_eq!(
            game.last_analytics().unwrap().total_play_time_ms,
            stepped_ms(181) - stepped_ms(121)
        );
    }
}
