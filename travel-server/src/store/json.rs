//! File-backed JSON store for preferences and travel history.
//!
//! The whole data set lives in memory and is rewritten to disk after
//! every mutation. A mutation only becomes visible once its write has
//! succeeded.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock, RwLockReadGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{HistoryRecord, NewHistoryRecord, Preferences, UserId};
use crate::planner::{LookupError, PreferenceLookup};

use super::error::StoreError;

/// A user's preferences as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredPreferences {
    user_id: UserId,

    #[serde(flatten)]
    preferences: Preferences,

    updated_at: DateTime<Utc>,
}

/// Everything the store persists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    travel_history: Vec<HistoryRecord>,

    #[serde(default)]
    user_preferences: Vec<StoredPreferences>,

    /// Last history id handed out.
    #[serde(default)]
    last_history_id: u64,
}

impl StoreData {
    /// Make sure ids never go backwards, even if the file was edited by hand.
    fn repair_sequence(&mut self) {
        let max_id = self.travel_history.iter().map(|h| h.id).max().unwrap_or(0);
        self.last_history_id = self.last_history_id.max(max_id);
    }
}

/// JSON-file store.
///
/// Thread-safe. Writers are serialized by `disk` and do their file I/O
/// without holding `data`, so readers only ever wait for a pointer swap.
#[derive(Debug)]
pub struct JsonStore {
    /// Where to persist. `None` keeps everything in memory.
    path: Option<PathBuf>,
    data: RwLock<StoreData>,
    disk: Mutex<()>,
}

impl JsonStore {
    /// Open the store at `path`.
    ///
    /// A missing file yields an empty store. A file that exists but can't
    /// be read or parsed is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let mut data = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
            serde_json::from_str::<StoreData>(&contents).map_err(|e| StoreError::Json {
                message: format!("{}: {}", path.display(), e),
            })?
        } else {
            StoreData::default()
        };
        data.repair_sequence();

        info!(
            path = %path.display(),
            history = data.travel_history.len(),
            preferences = data.user_preferences.len(),
            "opened travel store"
        );

        Ok(Self {
            path: Some(path),
            data: RwLock::new(data),
            disk: Mutex::new(()),
        })
    }

    /// Create a store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: RwLock::new(StoreData::default()),
            disk: Mutex::new(()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreData>, StoreError> {
        self.data.read().map_err(|_| StoreError::Poisoned)
    }

    /// Apply `change` to a copy of the data, persist the copy, then publish it.
    ///
    /// If persisting fails the in-memory data is left as it was.
    fn update<T>(&self, change: impl FnOnce(&mut StoreData) -> T) -> Result<T, StoreError> {
        let _disk = self.disk.lock().map_err(|_| StoreError::Poisoned)?;

        let mut next = self.read()?.clone();
        let result = change(&mut next);

        self.persist(&next)?;
        *self.data.write().map_err(|_| StoreError::Poisoned)? = next;
        Ok(result)
    }

    /// Write the data set to disk.
    ///
    /// Creates parent directories if they don't exist.
    fn persist(&self, data: &StoreData) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }

        let json = serde_json::to_string_pretty(data).map_err(|e| StoreError::Json {
            message: format!("failed to serialize store: {}", e),
        })?;

        std::fs::write(path, json).map_err(|e| io_error(path, e))?;
        debug!(path = %path.display(), "persisted travel store");
        Ok(())
    }

    /// Stored preferences for `user`.
    pub fn preferences(&self, user: UserId) -> Result<Option<Preferences>, StoreError> {
        let data = self.read()?;
        Ok(data
            .user_preferences
            .iter()
            .find(|p| p.user_id == user)
            .map(|p| p.preferences.clone()))
    }

    /// Insert or replace the preferences of `user`.
    pub fn upsert_preferences(
        &self,
        user: UserId,
        preferences: Preferences,
    ) -> Result<(), StoreError> {
        let row = StoredPreferences {
            user_id: user,
            preferences,
            updated_at: Utc::now(),
        };

        self.update(|data| {
            match data.user_preferences.iter_mut().find(|p| p.user_id == user) {
                Some(existing) => *existing = row,
                None => data.user_preferences.push(row),
            }
        })
    }

    /// Store a new history record and return it with its id.
    pub fn insert_history(&self, entry: NewHistoryRecord) -> Result<HistoryRecord, StoreError> {
        self.update(|data| {
            data.last_history_id += 1;
            let record = HistoryRecord {
                id: data.last_history_id,
                entry,
                created_at: Utc::now(),
            };
            data.travel_history.push(record.clone());
            record
        })
    }

    /// History of `user`, newest first.
    pub fn list_history(&self, user: UserId) -> Result<Vec<HistoryRecord>, StoreError> {
        let data = self.read()?;
        let mut history: Vec<HistoryRecord> = data
            .travel_history
            .iter()
            .filter(|h| h.belongs_to(user))
            .cloned()
            .collect();

        history.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(history)
    }

    /// Delete record `id` if it belongs to `user`.
    ///
    /// Returns `false` if there was no such record for that user.
    pub fn delete_history(&self, id: u64, user: UserId) -> Result<bool, StoreError> {
        let owned = |h: &HistoryRecord| h.id == id && h.belongs_to(user);
        if !self.read()?.travel_history.iter().any(owned) {
            return Ok(false);
        }

        self.update(|data| {
            let before = data.travel_history.len();
            data.travel_history.retain(|h| !owned(h));
            data.travel_history.len() < before
        })
    }
}

impl PreferenceLookup for JsonStore {
    fn lookup_preferences(&self, user: UserId) -> Result<Option<Preferences>, LookupError> {
        self.preferences(user).map_err(|e| LookupError {
            user,
            message: e.to_string(),
        })
    }
}

fn io_error(path: &Path, e: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
