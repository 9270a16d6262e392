//! Keyed JSON persistence over an external key-value collaborator.
//!
//! All records live under three fixed keys: the flat profile under
//! `experience`, the date-keyed daily log map under `@daily_data`, and the
//! weight history array under `weightData`. Writes replace the whole value
//! for a key; per-date updates are read-merge-write within one call.
//!
//! A failed or corrupt read degrades to the default record with a warning;
//! it is never fatal to the caller.

use crate::{DailyData, Profile, Result, WeightEntry};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Wire key for the flat onboarding profile record
pub const PROFILE_KEY: &str = "experience";
/// Wire key for the ISO-date -> DailyData map
pub const DAILY_DATA_KEY: &str = "@daily_data";
/// Wire key for the weight history array
pub const WEIGHT_DATA_KEY: &str = "weightData";

/// The external key-value persistence collaborator.
///
/// Values are JSON text; `get` returns `None` for an absent key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

// ============================================================================
// File-backed store
// ============================================================================

/// One file per key under a data directory, with shared-lock reads and
/// exclusive-lock atomic-rename writes.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read_result = reader.read_to_string(&mut contents);
        file.unlock()?;
        read_result?;

        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(self.key_path(key))
            .map_err(|e| crate::Error::Io(e.error))?;

        tracing::debug!("Wrote key {key:?} in {:?}", self.dir);
        Ok(())
    }
}

// ============================================================================
// In-memory store (tests, previews)
// ============================================================================

/// HashMap-backed store for tests
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// Record-level facade
// ============================================================================

/// Typed reads and read-merge-writes over the three fixed keys.
pub struct LogStore<S> {
    store: S,
}

impl<S: KeyValueStore> LogStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read and deserialize a key, degrading to `None` on any failure.
    fn read_key<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read key {key:?}: {e}. Using defaults.");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Failed to parse key {key:?}: {e}. Using defaults.");
                None
            }
        }
    }

    /// Load the profile; `None` when onboarding never completed or the
    /// record is unreadable.
    pub fn load_profile(&self) -> Option<Profile> {
        self.read_key(PROFILE_KEY)
    }

    pub fn save_profile(&self, profile: &Profile) -> Result<()> {
        self.store.set(PROFILE_KEY, &serde_json::to_string(profile)?)
    }

    /// The full date-keyed daily log map; empty on miss or corruption.
    pub fn load_all_days(&self) -> BTreeMap<String, DailyData> {
        self.read_key(DAILY_DATA_KEY).unwrap_or_default()
    }

    /// Load one date's log, or the default-zero record when none exists.
    pub fn load_day(&self, date: &str) -> DailyData {
        match self.load_all_days().remove(date) {
            Some(day) => {
                if !day.totals_consistent() {
                    tracing::warn!("Stored totals for {date} are inconsistent with items");
                }
                day
            }
            None => DailyData::for_date(date),
        }
    }

    /// Overwrite one date's record: read the map, replace the entry, write
    /// the whole map back. Concurrent writers to the same date are
    /// last-write-wins by design.
    pub fn save_day(&self, date: &str, data: &DailyData) -> Result<()> {
        let mut days = self.load_all_days();
        days.insert(date.to_string(), data.clone());
        self.store
            .set(DAILY_DATA_KEY, &serde_json::to_string(&days)?)
    }

    /// Weight history sorted ascending by date; empty on miss.
    pub fn load_weights(&self) -> Vec<WeightEntry> {
        let mut entries: Vec<WeightEntry> = self.read_key(WEIGHT_DATA_KEY).unwrap_or_default();
        entries.sort_by(|a, b| a.date.cmp(&b.date));
        entries
    }

    /// Record a weight measurement. One entry per date: a later write for
    /// the same date replaces the earlier one.
    pub fn record_weight(&self, entry: WeightEntry) -> Result<()> {
        let mut entries = self.load_weights();
        entries.retain(|e| e.date != entry.date);
        entries.push(entry);
        entries.sort_by(|a, b| a.date.cmp(&b.date));
        self.store
            .set(WEIGHT_DATA_KEY, &serde_json::to_string(&entries)?)
    }
}
