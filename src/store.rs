//! Persistent favorites state on top of a flat string key-value store.
//!
//! Three keys are used: the ordered favorite id list, the expansion flag of
//! the favorites panel and the list of removals deferred while the UI runs in
//! incremental mode. Reads never fail: missing or malformed values fall back
//! to their defaults. Writes replace a whole value at once.

use crate::defaults::{EXPANDED_KEY, FAVORITES_KEY, PENDING_REMOVALS_KEY};
use crate::meal::MealId;
use gloo_storage::{LocalStorage, Storage};
use log::{error, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A value could not be written.
    Write { key: String, reason: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Write { key, reason } => {
                write!(f, "Failed to write '{}': {}", key, reason)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Flat string-keyed persistence.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Browser `localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Error reading '{}' from localStorage: {:?}", key, e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}

/// In-memory store. Clones share the same entries.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable favorites, expansion flag and pending removals.
pub struct FavoritesStore {
    backend: Box<dyn KeyValueStore>,
}

impl FavoritesStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Store backed by the browser's `localStorage`.
    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }

    fn read_ids(&self, key: &str) -> Vec<MealId> {
        let Some(raw) = self.backend.read(key) else {
            return Vec::new();
        };
        // A stored JSON `null` counts as empty.
        match serde_json::from_str::<Option<Vec<MealId>>>(&raw) {
            Ok(ids) => ids.unwrap_or_default(),
            Err(e) => {
                warn!("Error reading '{}' from storage, using empty list: {}", key, e);
                Vec::new()
            }
        }
    }

    fn write_ids(&self, key: &str, ids: &[MealId]) {
        let encoded = match serde_json::to_string(ids) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!("Failed to encode '{}': {}", key, e);
                return;
            }
        };
        if let Err(e) = self.backend.write(key, &encoded) {
            error!("{}", e);
        }
    }

    /// Favorite ids, most recently added first.
    pub fn favorite_ids(&self) -> Vec<MealId> {
        self.read_ids(FAVORITES_KEY)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.favorite_ids().iter().any(|fav| fav == id)
    }

    /// Prepend `id` unless it is already a favorite. Re-adding an id also
    /// cancels a pending removal of it.
    pub fn add_favorite(&self, id: &str) {
        let ids = self.favorite_ids();
        if !ids.iter().any(|fav| fav == id) {
            let updated: Vec<MealId> = std::iter::once(id.to_string()).chain(ids).collect();
            self.write_ids(FAVORITES_KEY, &updated);
        }

        let pending = self.pending_removals();
        if pending.iter().any(|p| p == id) {
            let remaining: Vec<MealId> = pending.into_iter().filter(|p| p != id).collect();
            self.write_ids(PENDING_REMOVALS_KEY, &remaining);
        }
    }

    /// Drop every occurrence of `id`. Nothing is written when it is absent.
    pub fn remove_favorite(&self, id: &str) {
        let ids = self.favorite_ids();
        let before = ids.len();
        let updated: Vec<MealId> = ids.into_iter().filter(|fav| fav != id).collect();
        if updated.len() != before {
            self.write_ids(FAVORITES_KEY, &updated);
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.backend.read(EXPANDED_KEY).as_deref() == Some("true")
    }

    pub fn set_expanded(&self, expanded: bool) {
        if let Err(e) = self.backend.write(EXPANDED_KEY, &expanded.to_string()) {
            error!("{}", e);
        }
    }

    /// Removals recorded while rendering incrementally, oldest first.
    pub fn pending_removals(&self) -> Vec<MealId> {
        self.read_ids(PENDING_REMOVALS_KEY)
    }

    /// Record `id` for removal on the next full reconciliation.
    pub fn defer_removal(&self, id: &str) {
        let mut pending = self.pending_removals();
        if !pending.iter().any(|p| p == id) {
            pending.push(id.to_string());
            self.write_ids(PENDING_REMOVALS_KEY, &pending);
        }
    }

    /// Remove all pending ids from the favorites and clear the pending list.
    ///
    /// Returns the ids that were pending. The favorites are written before the
    /// pending list is cleared, so an interrupted apply is simply re-applied.
    pub fn apply_pending_removals(&self) -> Vec<MealId> {
        let pending = self.pending_removals();
        if pending.is_empty() {
            return pending;
        }

        let ids = self.favorite_ids();
        let before = ids.len();
        let updated: Vec<MealId> = ids
            .into_iter()
            .filter(|fav| !pending.contains(fav))
            .collect();
        if updated.len() != before {
            self.write_ids(FAVORITES_KEY, &updated);
        }
        self.write_ids(PENDING_REMOVALS_KEY, &[]);
        pending
    }
}
