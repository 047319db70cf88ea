//! Search and random-meal flows.
//!
//! Failures here are shown to the user instead of being silently dropped,
//! and never touch favorites state.

use crate::api::MealLookup;
use crate::meal::MealRecord;
use log::{error, info};

pub const NO_RESULTS_MESSAGE: &str = "No meals found. Try a different search term.";
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Meals(Vec<MealRecord>),
    NoResults,
    Failed(String),
}

impl SearchOutcome {
    /// Message to show instead of results, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            SearchOutcome::Meals(_) => None,
            SearchOutcome::NoResults => Some(NO_RESULTS_MESSAGE),
            SearchOutcome::Failed(message) => Some(message),
        }
    }
}

/// Search meals by name. A blank term does nothing and yields `None`.
pub async fn search(remote: &dyn MealLookup, term: &str) -> Option<SearchOutcome> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let outcome = match remote.search_meals(term).await {
        Ok(meals) if meals.is_empty() => SearchOutcome::NoResults,
        Ok(meals) => {
            info!("Search {:?} returned {} meals", term, meals.len());
            SearchOutcome::Meals(meals)
        }
        Err(e) => {
            error!("Search failed: {}", e);
            SearchOutcome::Failed(SEARCH_FAILED_MESSAGE.to_string())
        }
    };
    Some(outcome)
}

pub async fn random_meal(remote: &dyn MealLookup) -> Option<MealRecord> {
    match remote.random_meal().await {
        Ok(meal) => Some(meal),
        Err(e) => {
            error!("Failed to load random meal: {}", e);
            None
        }
    }
}
