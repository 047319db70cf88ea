//! Session cache of fetched meals.
//!
//! Entries live for the page session only and are never persisted. The cache
//! also remembers the fingerprint of the favorites order seen by the last
//! full reconciliation so that unchanged passes can be skipped.
//!
//! # Invalidation
//! - `remove`: when a meal is unfavorited, so a later re-add fetches fresh data
//! - `clear`: when the favorites list is observed empty; also resets the
//!   fingerprint to the empty sentinel

use crate::defaults::FINGERPRINT_SEPARATOR;
use crate::meal::{MealId, MealRecord};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Cache shared between the reconciler and overlapping passes.
pub type SharedCache = Rc<RefCell<MealCache>>;

#[derive(Debug, Default)]
pub struct MealCache {
    meals: HashMap<MealId, MealRecord>,
    favorites_order: String,
}

impl MealCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedCache {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn get(&self, id: &str) -> Option<&MealRecord> {
        self.meals.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.meals.contains_key(id)
    }

    /// Storing the same id twice is harmless; the last write wins.
    pub fn put(&mut self, id: MealId, meal: MealRecord) {
        self.meals.insert(id, meal);
    }

    pub fn remove(&mut self, id: &str) -> Option<MealRecord> {
        self.meals.remove(id)
    }

    pub fn clear(&mut self) {
        self.meals.clear();
        self.favorites_order.clear();
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    pub fn order_fingerprint(&self) -> &str {
        &self.favorites_order
    }

    pub fn set_order_fingerprint(&mut self, fingerprint: String) {
        self.favorites_order = fingerprint;
    }
}

/// Fingerprint of a favorites order. An empty list maps to the empty sentinel.
pub fn order_fingerprint_of(ids: &[MealId]) -> String {
    ids.join(FINGERPRINT_SEPARATOR)
}
