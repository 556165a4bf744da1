//! Coin Clicker persistence.
//!
//! Stats live under `gameStats_{user}` as `{"version":N,"stats":{..}}`.
//! Writes always use `SAVE_VERSION`. A blob with `N` below
//! `MIN_COMPATIBLE_VERSION` is dropped; anything newer loads, and fields it
//! lacks take their defaults. A bare camelCase stats object with no
//! envelope predates versioning and is migrated on load.
//!
//! The bonus day lives under `lastBonus_{user}`. It is written as
//! `YYYY-MM-DD`; stamps in the browser's `Tue Mar 05 2024` form are still
//! read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EconomyConfig;
use crate::storage::{scoped_key, KeyValueStore, StorageError, UserId};

use super::state::GameStats;

const SAVE_VERSION: u32 = 1;
const MIN_COMPATIBLE_VERSION: u32 = 1;

const STATS_PREFIX: &str = "gameStats";
const BONUS_PREFIX: &str = "lastBonus";
const BONUS_DATE_FORMAT: &str = "%Y-%m-%d";
/// `Date.prototype.toDateString()` output.
const LEGACY_BONUS_DATE_FORMAT: &str = "%a %b %d %Y";

/// Keyed store for per-user clicker data.
pub trait StatsStore {
    fn load(&self, user: &UserId) -> Option<GameStats>;
    fn save(&mut self, user: &UserId, stats: &GameStats) -> Result<(), StorageError>;
    fn last_bonus(&self, user: &UserId) -> Option<NaiveDate>;
    fn record_bonus(&mut self, user: &UserId, day: NaiveDate) -> Result<(), StorageError>;
}

#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    stats: GameStats,
}

/// [`StatsStore`] over any [`KeyValueStore`], JSON encoded.
pub struct LocalStatsStore<S: KeyValueStore> {
    store: S,
    config: EconomyConfig,
}

impl<S: KeyValueStore> LocalStatsStore<S> {
    pub fn new(store: S, config: EconomyConfig) -> Self {
        Self { store, config }
    }

    fn decode(&self, user: &UserId, json: &str) -> Option<GameStats> {
        let value: serde_json::Value = match serde_json::from_str(json) {
            Ok(v) => v,
            Err(e) => {
                crate::console::warn(&format!("clicker save for {user} is unreadable, discarding: {e}"));
                return None;
            }
        };

        // Envelopes always carry a numeric `version`; anything else is a
        // pre-envelope blob.
        let is_envelope = value.get("version").map(|v| v.is_u64()).unwrap_or(false);
        if !is_envelope {
            return match serde_json::from_value::<GameStats>(value) {
                Ok(stats) => {
                    crate::console::log(&format!("migrating legacy clicker save for {user}"));
                    Some(stats)
                }
                Err(e) => {
                    crate::console::warn(&format!("legacy clicker save for {user} is invalid: {e}"));
                    None
                }
            };
        }

        let data: SaveData = match serde_json::from_value(value) {
            Ok(d) => d,
            Err(e) => {
                crate::console::warn(&format!("clicker save for {user} is invalid, discarding: {e}"));
                return None;
            }
        };
        if data.version < MIN_COMPATIBLE_VERSION {
            crate::console::log(&format!(
                "clicker save for {user} too old (saved={}, min_compatible={}), starting fresh",
                data.version, MIN_COMPATIBLE_VERSION
            ));
            return None;
        }
        Some(data.stats)
    }
}

impl<S: KeyValueStore> StatsStore for LocalStatsStore<S> {
    fn load(&self, user: &UserId) -> Option<GameStats> {
        let key = scoped_key(STATS_PREFIX, user);
        let json = self.store.get(&key)?;
        self.decode(user, &json)
            .map(|stats| stats.sanitized(&self.config))
    }

    fn save(&mut self, user: &UserId, stats: &GameStats) -> Result<(), StorageError> {
        let key = scoped_key(STATS_PREFIX, user);
        let data = SaveData {
            version: SAVE_VERSION,
            stats: stats.clone(),
        };
        let json = serde_json::to_string(&data).map_err(|e| StorageError::Encode {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        self.store.set(&key, &json)
    }

    fn last_bonus(&self, user: &UserId) -> Option<NaiveDate> {
        let raw = self.store.get(&scoped_key(BONUS_PREFIX, user))?;
        let raw = raw.trim();
        // Unparsable stamps count as never claimed.
        NaiveDate::parse_from_str(raw, BONUS_DATE_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY_BONUS_DATE_FORMAT))
            .ok()
    }

    fn record_bonus(&mut self, user: &UserId, day: NaiveDate) -> Result<(), StorageError> {
        let key = scoped_key(BONUS_PREFIX, user);
        self.store.set(&key, &day.format(BONUS_DATE_FORMAT).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn kid() -> UserId {
        UserId::new("kid").unwrap()
    }

    fn store_with(key: &str, value: &str) -> LocalStatsStore<MemoryStore> {
        let mut mem = MemoryStore::new();
        mem.set(key, value).unwrap();
        LocalStatsStore::new(mem, EconomyConfig::default())
    }

    #[test]
    fn save_and_load_roundtrip() {
        let mut store = LocalStatsStore::new(MemoryStore::new(), EconomyConfig::default());
        let stats = GameStats {
            total_clicks: 42,
            total_earned: 84,
            multiplier: 2,
            energy: 58,
            max_energy: 120,
        };
        store.save(&kid(), &stats).unwrap();
        assert_eq!(store.load(&kid()), Some(stats));
    }

    #[test]
    fn missing_save_is_none() {
        let store = LocalStatsStore::new(MemoryStore::new(), EconomyConfig::default());
        assert_eq!(store.load(&kid()), None);
        assert_eq!(store.last_bonus(&kid()), None);
    }

    #[test]
    fn saves_are_per_user() {
        let mut store = LocalStatsStore::new(MemoryStore::new(), EconomyConfig::default());
        let stats = GameStats {
            total_clicks: 1,
            ..GameStats::default()
        };
        store.save(&kid(), &stats).unwrap();
        assert_eq!(store.load(&UserId::new("sibling").unwrap()), None);
    }

    #[test]
    fn envelope_written_under_scoped_key() {
        let mut mem = MemoryStore::new();
        {
            let mut store = LocalStatsStore::new(&mut mem, EconomyConfig::default());
            store.save(&kid(), &GameStats::default()).unwrap();
        }
        let json = mem.get("gameStats_kid").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], SAVE_VERSION);
        assert_eq!(value["stats"]["maxEnergy"], 100);
    }

    #[test]
    fn legacy_blob_is_migrated() {
        let legacy = r#"{"totalClicks":10,"totalEarned":30,"multiplier":3,"energy":90,"maxEnergy":100}"#;
        let store = store_with("gameStats_kid", legacy);
        let stats = store.load(&kid()).unwrap();
        assert_eq!(stats.total_clicks, 10);
        assert_eq!(stats.total_earned, 30);
        assert_eq!(stats.multiplier, 3);
        assert_eq!(stats.energy, 90);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let store = store_with("gameStats_kid", r#"{"version":1,"stats":{"totalClicks":7}}"#);
        let stats = store.load(&kid()).unwrap();
        assert_eq!(stats.total_clicks, 7);
        assert_eq!(stats.multiplier, 1);
        assert_eq!(stats.max_energy, 100);
    }

    #[test]
    fn too_old_version_is_discarded() {
        let store = store_with("gameStats_kid", r#"{"version":0,"stats":{"totalClicks":7}}"#);
        assert_eq!(store.load(&kid()), None);
    }

    #[test]
    fn corrupt_blob_is_discarded() {
        let store = store_with("gameStats_kid", "{{{");
        assert_eq!(store.load(&kid()), None);
    }

    #[test]
    fn loaded_stats_are_sanitized() {
        let store = store_with(
            "gameStats_kid",
            r#"{"version":1,"stats":{"multiplier":0,"energy":999,"maxEnergy":50}}"#,
        );
        let stats = store.load(&kid()).unwrap();
        assert_eq!(stats.multiplier, 1);
        assert_eq!(stats.max_energy, 100);
        assert_eq!(stats.energy, 100);
    }

    #[test]
    fn bonus_date_roundtrip() {
        let mut store = LocalStatsStore::new(MemoryStore::new(), EconomyConfig::default());
        let day = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        store.record_bonus(&kid(), day).unwrap();
        assert_eq!(store.last_bonus(&kid()), Some(day));
    }

    #[test]
    fn bonus_date_is_iso() {
        let mut mem = MemoryStore::new();
        {
            let mut store = LocalStatsStore::new(&mut mem, EconomyConfig::default());
            let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
            store.record_bonus(&kid(), day).unwrap();
        }
        assert_eq!(mem.get("lastBonus_kid").as_deref(), Some("2024-03-07"));
    }

    #[test]
    fn browser_date_string_bonus_parses() {
        let store = store_with("lastBonus_kid", "Tue Mar 05 2024");
        assert_eq!(
            store.last_bonus(&kid()),
            Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        );
    }

    #[test]
    fn garbage_bonus_date_counts_as_never() {
        let store = store_with("lastBonus_kid", "someday");
        assert_eq!(store.last_bonus(&kid()), None);
    }
}
