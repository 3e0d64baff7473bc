//! Headless BUGSTORM runner.
//!
//! Usage: `bugstorm [config.json]`. Logging follows `RUST_LOG`.

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bugstorm_app::config::AppConfig;
use bugstorm_app::error::AppError;
use bugstorm_app::frontend::{HeadlessRenderer, LogNotifier};
use bugstorm_app::game_loop::GameLoop;
use bugstorm_app::persistence::{read_session_count, JsonFileStore, KeyValueStore, MemoryStore};
use bugstorm_core::commands::PlayerCommand;

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load_or_default(config_path.as_deref())?;
    info!(seed = config.seed, max_ticks = config.max_ticks, "starting BUGSTORM");

    match &config.store_path {
        Some(path) => run(&config, JsonFileStore::open(path)?),
        None => run(&config, MemoryStore::new()),
    }
    Ok(())
}

fn run<S: KeyValueStore>(config: &AppConfig, store: S) {
    info!(sessions = read_session_count(&store), "store opened");

    let mut game =
        GameLoop::from_config(config, HeadlessRenderer::new(), LogNotifier::new(), store);
    if !config.autopilot {
        game.queue_command(PlayerCommand::StartGame);
    }

    if let Some(last) = game.run(config.max_ticks, config.realtime) {
        info!(
            phase = ?last.phase,
            ticks = last.time.tick,
            level = last.player.level,
            kills = last.player.kills,
            bosses = last.difficulty.bosses_defeated,
            "run complete"
        );
    }
}
