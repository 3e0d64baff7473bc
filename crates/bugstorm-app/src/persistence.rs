//! Persistent key-value store and the session analytics written to it.
//!
//! Two fixed keys: a decimal session counter and a JSON analytics blob.
//! Nothing here feeds back into gameplay.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use bugstorm_core::state::GameStateSnapshot;

use crate::error::StoreError;

pub const SESSIONS_KEY: &str = "bugstorm_sessions";
pub const ANALYTICS_KEY: &str = "bugstorm_analytics";

const RETENTION_CAP: f64 = 10.0;
const RETENTION_PER_SESSION: f64 = 0.5;
const RETENTION_PER_MINUTE: f64 = 0.1;

/// String-to-string store with the semantics of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile store, used when no file is configured and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single pretty-printed JSON object on disk.
///
/// The whole map is rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            let json = fs::read_to_string(&path)?;
            serde_json::from_str(&json)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Sessions recorded so far. Missing or unparsable values count as zero.
pub fn read_session_count(store: &dyn KeyValueStore) -> u32 {
    store
        .get(SESSIONS_KEY)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0)
}

/// Aggregate numbers for one finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionAnalytics {
    /// Sessions recorded before this one.
    pub sessions_count: u32,
    pub total_play_time_ms: u64,
    pub retention_score: f64,
    pub weapons_unlocked: usize,
    pub bosses_defeated: u32,
    pub max_level: u32,
    pub kills: u32,
    pub sound_toggle_used: bool,
    pub engagement_ready: bool,
}

impl SessionAnalytics {
    pub fn from_snapshot(
        snapshot: &GameStateSnapshot,
        sessions_count: u32,
        total_play_time_ms: u64,
    ) -> Self {
        let minutes = total_play_time_ms as f64 / 60_000.0;
        let retention_score = (sessions_count as f64 * RETENTION_PER_SESSION
            + minutes * RETENTION_PER_MINUTE)
            .min(RETENTION_CAP);
        let max_level = snapshot.player.level;

        Self {
            sessions_count,
            total_play_time_ms,
            retention_score,
            weapons_unlocked: snapshot.player.weapons.len(),
            bosses_defeated: snapshot.difficulty.bosses_defeated,
            max_level,
            kills: snapshot.player.kills,
            sound_toggle_used: snapshot.sound_toggled,
            engagement_ready: sessions_count > 3 && minutes > 5.0 && max_level > 10,
        }
    }

    pub fn play_minutes(&self) -> f64 {
        self.total_play_time_ms as f64 / 60_000.0
    }
}

/// Bump the session counter and write the analytics for a finished session.
pub fn record_session(
    store: &mut dyn KeyValueStore,
    snapshot: &GameStateSnapshot,
    total_play_time_ms: u64,
) -> Result<SessionAnalytics, StoreError> {
    let previous = read_session_count(store);
    let analytics = SessionAnalytics::from_snapshot(snapshot, previous, total_play_time_ms);

    store.set(SESSIONS_KEY, &previous.saturating_add(1).to_string())?;
    store.set(ANALYTICS_KEY, &serde_json::to_string(&analytics)?)?;

    info!(
        sessions = previous.saturating_add(1),
        level = analytics.max_level,
        kills = analytics.kills,
        retention = analytics.retention_score,
        "session recorded"
    );
    debug!(engagement_ready = analytics.engagement_ready, "analytics");
    Ok(analytics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugstorm_core::enums::WeaponKind;
    use bugstorm_core::state::{PlayerView, WeaponView};

    fn snapshot_at(level: u32, kills: u32, weapons: usize) -> GameStateSnapshot {
        let weapons = WeaponKind::UNLOCKABLE
            .iter()
            .take(weapons)
            .map(|&kind| WeaponView {
                kind,
                name: kind.name().to_string(),
                level: 1,
                damage: kind.base_damage(),
                archetype: kind.archetype(),
            })
            .collect();
        GameStateSnapshot {
            player: PlayerView {
                level,
                kills,
                weapons,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.set("k", "w").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("w"));
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = std::env::temp_dir().join("bugstorm_test_file_store");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(SESSIONS_KEY), None);
        store.set(SESSIONS_KEY, "3").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(read_session_count(&reopened), 3);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let dir = std::env::temp_dir().join("bugstorm_test_file_store_corrupt");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("store.json");
        fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Json(_))
        ));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn garbage_counter_reads_as_zero() {
        let mut store = MemoryStore::new();
        assert_eq!(read_session_count(&store), 0);
        store.set(SESSIONS_KEY, "lots").unwrap();
        assert_eq!(read_session_count(&store), 0);
        store.set(SESSIONS_KEY, "12").unwrap();
        assert_eq!(read_session_count(&store), 12);
    }

    #[test]
    fn retention_score_is_capped() {
        let snapshot = snapshot_at(3, 10, 1);
        let early = SessionAnalytics::from_snapshot(&snapshot, 2, 120_000);
        assert!((early.retention_score - 1.2).abs() < 1e-9);

        let veteran = SessionAnalytics::from_snapshot(&snapshot, 40, 600_000);
        assert_eq!(veteran.retention_score, 10.0);
    }

    #[test]
    fn engagement_needs_all_three_signals() {
        let long_game = 6 * 60_000;
        let high = snapshot_at(11, 200, 3);
        assert!(SessionAnalytics::from_snapshot(&high, 4, long_game).engagement_ready);
        assert!(!SessionAnalytics::from_snapshot(&high, 3, long_game).engagement_ready);
        assert!(!SessionAnalytics::from_snapshot(&high, 4, 5 * 60_000).engagement_ready);

        let low = snapshot_at(10, 200, 3);
        assert!(!SessionAnalytics::from_snapshot(&low, 4, long_game).engagement_ready);
    }

    #[test]
    fn analytics_reads_snapshot_fields() {
        let mut snapshot = snapshot_at(7, 55, 3);
        snapshot.sound_toggled = true;
        snapshot.difficulty.bosses_defeated = 1;

        let analytics = SessionAnalytics::from_snapshot(&snapshot, 0, 90_000);
        assert_eq!(analytics.weapons_unlocked, 3);
        assert_eq!(analytics.bosses_defeated, 1);
        assert_eq!(analytics.max_level, 7);
        assert_eq!(analytics.kills, 55);
        assert!(analytics.sound_toggle_used);
        assert!((analytics.play_minutes() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn record_session_increments_and_stores_json() {
        let mut store = MemoryStore::new();
        store.set(SESSIONS_KEY, "2").unwrap();
        let snapshot = snapshot_at(4, 30, 2);

        let analytics = record_session(&mut store, &snapshot, 60_000).unwrap();
        assert_eq!(analytics.sessions_count, 2);
        assert_eq!(read_session_count(&store), 3);

        let stored: SessionAnalytics =
            serde_json::from_str(&store.get(ANALYTICS_KEY).unwrap()).unwrap();
        assert_eq!(stored, analytics);

        record_session(&mut store, &snapshot, 60_000).unwrap();
        assert_eq!(read_session_count(&store), 4);
    }
}
