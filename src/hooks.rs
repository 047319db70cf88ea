use crate::config::{COLLAPSE_SCROLL_RESET_DELAY_MS, OVERFLOW_CHECK_DELAY_MS, SCROLL_RESET_DELAY_MS};
use crate::utils::{has_overflow, reset_scroll, restore_scroll, scroll_top};
use gloo_timers::callback::Timeout;
use log::debug;
use meal_favorites::{FavoritesReconciler, MealId, MealRecord, PassKind};
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// State and callbacks for the search box.
#[derive(Clone)]
pub struct SearchInput {
    /// Current text of the input field.
    pub text: String,
    pub on_input: Callback<InputEvent>,
    /// Submits on Enter.
    pub on_keypress: Callback<KeyboardEvent>,
    /// Submits the current text.
    pub on_submit: Callback<MouseEvent>,
}

/// Custom hook for a search field that reports its text on submit.
#[hook]
pub fn use_search_input(on_search: Callback<String>) -> SearchInput {
    let text_handle = use_state(String::new);

    let on_input = {
        let text_setter = text_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let on_keypress = {
        let text = text_handle.clone();
        let on_search = on_search.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                on_search.emit((*text).clone());
            }
        })
    };

    let on_submit = {
        let text = text_handle.clone();
        Callback::from(move |_: MouseEvent| on_search.emit((*text).clone()))
    };

    SearchInput {
        text: (*text_handle).clone(),
        on_input,
        on_keypress,
        on_submit,
    }
}

/// Favorites panel state driven by the reconciler.
#[derive(Clone)]
pub struct FavoritesPanel {
    pub meals: Rc<Vec<MealRecord>>,
    pub count: usize,
    pub expanded: bool,
    pub has_overflow: bool,
    pub list_ref: NodeRef,
    /// Run a reconciliation pass and publish its result.
    pub refresh: Callback<()>,
    pub toggle_favorite: Callback<MealId>,
    pub remove_favorite: Callback<MealId>,
    pub toggle_expanded: Callback<MouseEvent>,
}

/// Helper to bump a revision counter and trigger a re-render
fn bump(revision: &UseStateHandle<usize>) {
    revision.set(revision.wrapping_add(1));
}

fn schedule_overflow_check(list_ref: NodeRef, expanded: bool, overflow: UseStateHandle<bool>) {
    Timeout::new(OVERFLOW_CHECK_DELAY_MS, move || {
        overflow.set(has_overflow(&list_ref, expanded));
    })
    .forget();
}

/// Custom hook wiring the favorites panel to a session reconciler.
#[hook]
pub fn use_favorites(reconciler: Rc<FavoritesReconciler>) -> FavoritesPanel {
    let meals = use_state(|| Rc::new(Vec::<MealRecord>::new()));
    let count = use_state(|| 0usize);
    let expanded = use_state(|| reconciler.is_expanded());
    let overflow = use_state(|| false);
    // Bumped whenever favorites change so heart buttons re-render.
    let revision = use_state(|| 0usize);
    let list_ref = use_node_ref();

    let refresh = {
        let reconciler = reconciler.clone();
        let meals = meals.clone();
        let count = count.clone();
        let expanded = expanded.clone();
        let overflow = overflow.clone();
        let list_ref = list_ref.clone();
        Callback::from(move |_: ()| {
            let reconciler = reconciler.clone();
            let meals = meals.clone();
            let count = count.clone();
            let expanded = *expanded;
            let overflow = overflow.clone();
            let list_ref = list_ref.clone();
            let offset = scroll_top(&list_ref);

            wasm_bindgen_futures::spawn_local(async move {
                let outcome = reconciler.reconcile().await;
                debug!(
                    "Favorites pass {:?}: {} shown, {} fetched",
                    outcome.kind,
                    outcome.meals.len(),
                    outcome.fetched
                );

                count.set(outcome.count);
                if outcome.kind != PassKind::Skipped {
                    meals.set(Rc::new(outcome.meals));
                }

                if outcome.preserve_scroll {
                    restore_scroll(&list_ref, offset);
                } else {
                    let list_ref = list_ref.clone();
                    Timeout::new(SCROLL_RESET_DELAY_MS, move || reset_scroll(&list_ref)).forget();
                }
                schedule_overflow_check(list_ref, expanded, overflow);
            });
        })
    };

    let toggle_favorite = {
        let reconciler = reconciler.clone();
        let refresh = refresh.clone();
        let revision = revision.clone();
        Callback::from(move |id: MealId| {
            reconciler.toggle_favorite(&id);
            bump(&revision);
            refresh.emit(());
        })
    };

    let remove_favorite = {
        let reconciler = reconciler.clone();
        let refresh = refresh.clone();
        let revision = revision.clone();
        Callback::from(move |id: MealId| {
            reconciler.remove_favorite(&id);
            bump(&revision);
            refresh.emit(());
        })
    };

    let toggle_expanded = {
        let expanded = expanded.clone();
        let overflow = overflow.clone();
        let list_ref = list_ref.clone();
        Callback::from(move |_: MouseEvent| {
            let now_expanded = reconciler.toggle_expansion();
            expanded.set(now_expanded);

            if !now_expanded {
                let list_ref = list_ref.clone();
                Timeout::new(COLLAPSE_SCROLL_RESET_DELAY_MS, move || reset_scroll(&list_ref))
                    .forget();
            }
            schedule_overflow_check(list_ref.clone(), now_expanded, overflow.clone());
        })
    };

    FavoritesPanel {
        meals: (*meals).clone(),
        count: *count,
        expanded: *expanded,
        has_overflow: *overflow,
        list_ref,
        refresh,
        toggle_favorite,
        remove_favorite,
        toggle_expanded,
    }
}
