//! Test doubles for the remote lookup client.

use crate::api::{LookupError, MealLookup};
use crate::meal::MealRecord;
use async_trait::async_trait;
use futures::channel::oneshot;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

pub fn meal(id: &str, name: &str) -> MealRecord {
    serde_json::from_value(serde_json::json!({
        "idMeal": id,
        "strMeal": name,
        "strMealThumb": format!("https://example.test/{id}.jpg"),
    }))
    .expect("valid meal payload")
}

/// Answers lookups from a fixed catalogue and records every call.
#[derive(Default)]
pub struct StubLookup {
    meals: RefCell<BTreeMap<String, MealRecord>>,
    failing: RefCell<HashSet<String>>,
    search_down: RefCell<bool>,
    calls: RefCell<Vec<String>>,
}

impl StubLookup {
    pub fn with_meals(entries: &[(&str, &str)]) -> Self {
        let stub = Self::default();
        for (id, name) in entries {
            stub.insert(meal(id, name));
        }
        stub
    }

    pub fn insert(&self, meal: MealRecord) {
        self.meals.borrow_mut().insert(meal.id.clone(), meal);
    }

    /// Make lookups of `id` fail with a network error.
    pub fn fail(&self, id: &str) {
        self.failing.borrow_mut().insert(id.to_string());
    }

    pub fn recover(&self, id: &str) {
        self.failing.borrow_mut().remove(id);
    }

    pub fn take_search_down(&self) {
        *self.search_down.borrow_mut() = true;
    }

    /// Number of `meal_by_id` calls issued for `id`.
    pub fn lookups_for(&self, id: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == id).count()
    }

    pub fn total_lookups(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl MealLookup for StubLookup {
    async fn random_meal(&self) -> Result<MealRecord, LookupError> {
        self.meals
            .borrow()
            .values()
            .next()
            .cloned()
            .ok_or_else(|| LookupError::NotFound("random request".to_string()))
    }

    async fn meal_by_id(&self, id: &str) -> Result<MealRecord, LookupError> {
        self.calls.borrow_mut().push(id.to_string());
        if self.failing.borrow().contains(id) {
            return Err(LookupError::Network("connection reset".to_string()));
        }
        self.meals
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(format!("id {}", id)))
    }

    async fn search_meals(&self, term: &str) -> Result<Vec<MealRecord>, LookupError> {
        if *self.search_down.borrow() {
            return Err(LookupError::Status(500));
        }
        let needle = term.to_lowercase();
        Ok(self
            .meals
            .borrow()
            .values()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

/// Lookups that stay pending until the test releases them.
#[derive(Default)]
pub struct GatedLookup {
    gates: RefCell<HashMap<String, VecDeque<oneshot::Receiver<MealRecord>>>>,
}

impl GatedLookup {
    /// Queue a pending lookup for `id` and return the sender that completes
    /// it. Gates for the same id are consumed in registration order.
    pub fn gate(&self, id: &str) -> oneshot::Sender<MealRecord> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .borrow_mut()
            .entry(id.to_string())
            .or_default()
            .push_back(rx);
        tx
    }
}

#[async_trait(?Send)]
impl MealLookup for GatedLookup {
    async fn random_meal(&self) -> Result<MealRecord, LookupError> {
        Err(LookupError::NotFound("random request".to_string()))
    }

    async fn meal_by_id(&self, id: &str) -> Result<MealRecord, LookupError> {
        let gate = self
            .gates
            .borrow_mut()
            .get_mut(id)
            .and_then(VecDeque::pop_front);
        match gate {
            Some(rx) => rx
                .await
                .map_err(|_| LookupError::Network("gate dropped".to_string())),
            None => Err(LookupError::NotFound(format!("id {}", id))),
        }
    }

    async fn search_meals(&self, _term: &str) -> Result<Vec<MealRecord>, LookupError> {
        Ok(Vec::new())
    }
}
