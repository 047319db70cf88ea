//! Recipe lookup and favorites management for the browser.
//!
//! Meals come from TheMealDB; favorites are kept in `localStorage` as an
//! ordered id list (most recent first). The [`reconciler`] turns that list
//! into render-ready meal records, using the session [`cache`] to avoid
//! fetching the same meal twice.
//!
//! Everything here runs on the single browser thread: shared state lives in
//! `Rc`/`RefCell` and remote lookups are joined cooperatively.

pub mod api;
pub mod browse;
pub mod cache;
pub mod meal;
pub mod reconciler;
pub mod store;

#[cfg(test)]
mod testing;

pub use api::{LookupError, MealDbClient, MealDbConfig, MealLookup};
pub use cache::{MealCache, SharedCache};
pub use meal::{Ingredient, MealId, MealRecord};
pub use reconciler::{FavoritesReconciler, PassKind, ReconcileMode, ReconcileOutcome};
pub use store::{BrowserStorage, FavoritesStore, KeyValueStore, MemoryStorage, StoreError};

/// Library defaults
pub mod defaults {
    pub const MEALDB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";
    /// Highest numbered ingredient slot in an API record.
    pub const MAX_INGREDIENTS: usize = 20;
    pub const FINGERPRINT_SEPARATOR: &str = ",";

    // localStorage keys
    pub const FAVORITES_KEY: &str = "mealIds";
    pub const EXPANDED_KEY: &str = "favoritesExpanded";
    pub const PENDING_REMOVALS_KEY: &str = "pendingRemovals";
}
