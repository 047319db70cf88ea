//! Favorites reconciliation.
//!
//! Turns the persisted favorites list into an ordered list of meal records
//! ready to render, fetching only what the session cache does not hold.
//!
//! Two strategies share the same resolution step:
//! - **Full**: rebuilds the render list in favorites order. Skipped when the
//!   order fingerprint and the rendered count are unchanged.
//! - **Incremental**: appends newly favorited meals only. Removals are
//!   deferred to the next full pass through the store's pending list.
//!
//! Passes may overlap (rapid clicks spawn new passes while older ones are
//! still waiting on the network). Nothing is cancelled: a full pass only
//! publishes if no newer full pass has rewritten the order fingerprint since it
//! started, so the most recently started pass wins. The first pass of a
//! session is always full.

use crate::api::MealLookup;
use crate::cache::{order_fingerprint_of, SharedCache};
use crate::meal::{MealId, MealRecord};
use crate::store::FavoritesStore;
use futures::future::join_all;
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcileMode {
    #[default]
    Full,
    /// Append-only updates for devices where a full re-render is disruptive.
    Incremental,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Nothing changed; only the count was republished.
    Skipped,
    /// The render list was rebuilt from the favorites list.
    Rebuilt,
    /// New favorites were appended to the existing render list.
    Appended,
    /// A newer full pass finished first; this pass's results were dropped.
    Superseded,
}

/// What the presentation layer needs after a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOutcome {
    pub kind: PassKind,
    /// The complete render list after the pass, in display order.
    pub meals: Vec<MealRecord>,
    /// Keep the current scroll offset instead of scrolling to the top.
    pub preserve_scroll: bool,
    /// Favorites count for the header indicator.
    pub count: usize,
    /// Remote lookups issued by this pass.
    pub fetched: usize,
}

/// The rendered favorites, keyed by meal id.
#[derive(Debug, Default, Clone)]
pub struct RenderedFavorites {
    meals: Vec<MealRecord>,
}

impl RenderedFavorites {
    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MealRecord> {
        self.meals.iter().find(|m| m.id == id)
    }

    pub fn ids(&self) -> HashSet<MealId> {
        self.meals.iter().map(|m| m.id.clone()).collect()
    }

    pub fn meals(&self) -> &[MealRecord] {
        &self.meals
    }

    fn clear(&mut self) {
        self.meals.clear();
    }

    fn replace(&mut self, meals: Vec<MealRecord>) {
        self.meals = meals;
    }

    /// Append meals not already rendered; returns how many were added.
    fn append(&mut self, meals: Vec<MealRecord>) -> usize {
        let mut added = 0;
        for meal in meals {
            if self.get(&meal.id).is_none() {
                self.meals.push(meal);
                added += 1;
            }
        }
        added
    }
}

enum Resolution {
    Cached(MealRecord),
    Fetched(MealRecord),
    Failed,
}

pub struct FavoritesReconciler {
    remote: Rc<dyn MealLookup>,
    store: Rc<FavoritesStore>,
    cache: SharedCache,
    rendered: RefCell<RenderedFavorites>,
    mode: Cell<ReconcileMode>,
    /// Set until the session's first pass has run.
    first_pass: Cell<bool>,
}

impl FavoritesReconciler {
    pub fn new(remote: Rc<dyn MealLookup>, store: Rc<FavoritesStore>, cache: SharedCache) -> Self {
        Self {
            remote,
            store,
            cache,
            rendered: RefCell::new(RenderedFavorites::default()),
            mode: Cell::new(ReconcileMode::Full),
            first_pass: Cell::new(true),
        }
    }

    pub fn mode(&self) -> ReconcileMode {
        self.mode.get()
    }

    pub fn set_mode(&self, mode: ReconcileMode) {
        self.mode.set(mode);
    }

    // ──────────────────────────────────────────────────────────────────────
    // Actions from the presentation layer

    pub fn add_favorite(&self, id: &str) {
        self.store.add_favorite(id);
    }

    /// Unfavorite a meal and evict it from the cache.
    ///
    /// In incremental mode the removal is only recorded; the entry stays
    /// rendered until the next full pass applies it.
    pub fn remove_favorite(&self, id: &str) {
        match self.mode.get() {
            ReconcileMode::Full => self.store.remove_favorite(id),
            ReconcileMode::Incremental => self.store.defer_removal(id),
        }
        self.cache.borrow_mut().remove(id);
    }

    /// Flip the favorite state of `id`, returning the new state.
    pub fn toggle_favorite(&self, id: &str) -> bool {
        if self.is_favorite(id) {
            self.remove_favorite(id);
            false
        } else {
            self.add_favorite(id);
            true
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.store.contains(id) && !self.store.pending_removals().iter().any(|p| p == id)
    }

    /// Favorites excluding those pending removal, in display order.
    fn effective_ids(&self) -> Vec<MealId> {
        let pending = self.store.pending_removals();
        self.store
            .favorite_ids()
            .into_iter()
            .filter(|id| !pending.contains(id))
            .collect()
    }

    pub fn favorite_count(&self) -> usize {
        self.effective_ids().len()
    }

    pub fn is_expanded(&self) -> bool {
        self.store.is_expanded()
    }

    pub fn toggle_expansion(&self) -> bool {
        let expanded = !self.store.is_expanded();
        self.store.set_expanded(expanded);
        expanded
    }

    pub fn rendered_meal(&self, id: &str) -> Option<MealRecord> {
        self.rendered.borrow().get(id).cloned()
    }

    pub fn rendered_count(&self) -> usize {
        self.rendered.borrow().len()
    }

    pub fn rendered_meals(&self) -> Vec<MealRecord> {
        self.rendered.borrow().meals().to_vec()
    }

    // ──────────────────────────────────────────────────────────────────────
    // Passes

    /// Run one pass with the current mode.
    ///
    /// The first pass of a session is always full, so removals deferred by an
    /// earlier incremental session get applied on the next page load.
    pub async fn reconcile(&self) -> ReconcileOutcome {
        if self.first_pass.replace(false) {
            return self.reconcile_full().await;
        }
        match self.mode.get() {
            ReconcileMode::Full => self.reconcile_full().await,
            ReconcileMode::Incremental => self.reconcile_incremental().await,
        }
    }

    pub async fn reconcile_full(&self) -> ReconcileOutcome {
        self.first_pass.set(false);

        // Pending removals must land before the fingerprint check, otherwise
        // the stale order would still match and the pass would be skipped.
        let applied = self.store.apply_pending_removals();
        if !applied.is_empty() {
            debug!("Applied {} pending removals", applied.len());
            let mut cache = self.cache.borrow_mut();
            for id in &applied {
                cache.remove(id);
            }
        }

        let ids = self.store.favorite_ids();
        let current = order_fingerprint_of(&ids);
        let previous = self.cache.borrow().order_fingerprint().to_owned();

        let preserve_scroll = !previous.is_empty();

        if current == previous && self.rendered_count() == ids.len() {
            debug!("Favorites unchanged ({} items), skipping rebuild", ids.len());
            return ReconcileOutcome {
                kind: PassKind::Skipped,
                meals: self.rendered_meals(),
                preserve_scroll,
                count: self.publish_count(),
                fetched: 0,
            };
        }

        self.cache.borrow_mut().set_order_fingerprint(current.clone());
        self.rendered.borrow_mut().clear();

        let (meals, fetched) = self.resolve_all(&ids).await;

        // A pass started after this one has rewritten the fingerprint (or the
        // cache was cleared); its render list is newer than ours.
        if self.cache.borrow().order_fingerprint() != current {
            debug!("Favorites pass for [{}] superseded, dropping results", current);
            return ReconcileOutcome {
                kind: PassKind::Superseded,
                meals: self.rendered_meals(),
                preserve_scroll: true,
                count: self.publish_count(),
                fetched,
            };
        }
        self.rendered.borrow_mut().replace(meals.clone());

        info!(
            "Rendered {}/{} favorites ({} fetched)",
            meals.len(),
            ids.len(),
            fetched
        );

        ReconcileOutcome {
            kind: PassKind::Rebuilt,
            meals,
            preserve_scroll,
            count: self.publish_count(),
            fetched,
        }
    }

    pub async fn reconcile_incremental(&self) -> ReconcileOutcome {
        let ids = self.effective_ids();
        let rendered = self.rendered.borrow().ids();
        let new_ids: Vec<MealId> = ids
            .iter()
            .filter(|id| !rendered.contains(*id))
            .cloned()
            .collect();

        if new_ids.is_empty() {
            return ReconcileOutcome {
                kind: PassKind::Skipped,
                meals: self.rendered_meals(),
                preserve_scroll: true,
                count: self.release_if_empty(ids.len()),
                fetched: 0,
            };
        }

        let (meals, fetched) = self.resolve_all(&new_ids).await;
        let added = self.rendered.borrow_mut().append(meals);
        debug!("Appended {} favorites ({} fetched)", added, fetched);

        ReconcileOutcome {
            kind: PassKind::Appended,
            meals: self.rendered_meals(),
            preserve_scroll: true,
            count: self.release_if_empty(self.favorite_count()),
            fetched,
        }
    }

    /// Re-read the favorites count; an empty list releases the whole cache.
    fn publish_count(&self) -> usize {
        self.release_if_empty(self.store.favorite_ids().len())
    }

    fn release_if_empty(&self, count: usize) -> usize {
        if count == 0 {
            self.cache.borrow_mut().clear();
        }
        count
    }

    /// Resolve every id concurrently. Results keep the order of `ids`;
    /// failed lookups are dropped. Returns the records and the fetch count.
    async fn resolve_all(&self, ids: &[MealId]) -> (Vec<MealRecord>, usize) {
        let resolutions = join_all(ids.iter().map(|id| self.resolve(id))).await;

        let mut fetched = 0;
        let mut meals = Vec::with_capacity(resolutions.len());
        for resolution in resolutions {
            match resolution {
                Resolution::Cached(meal) => meals.push(meal),
                Resolution::Fetched(meal) => {
                    fetched += 1;
                    meals.push(meal);
                }
                Resolution::Failed => fetched += 1,
            }
        }
        (meals, fetched)
    }

    async fn resolve(&self, id: &str) -> Resolution {
        let cached = self.cache.borrow().get(id).cloned();
        if let Some(meal) = cached {
            return Resolution::Cached(meal);
        }

        match self.remote.meal_by_id(id).await {
            Ok(meal) => {
                // Unfavorited while the lookup was in flight: keep it out of
                // the cache so a later re-add fetches fresh data.
                if self.is_favorite(id) {
                    self.cache.borrow_mut().put(id.to_string(), meal.clone());
                }
                Resolution::Fetched(meal)
            }
            Err(e) => {
                warn!("Failed to load meal {}: {}", id, e);
                Resolution::Failed
            }
        }
    }
}
