//! Main module for the recipe app using Yew.
//! Builds the session services once and wires them to the UI components.

use gloo_timers::callback::Timeout;
use meal_favorites::browse::{self, SearchOutcome};
use meal_favorites::{
    FavoritesReconciler, FavoritesStore, MealCache, MealDbClient, MealLookup, MealRecord,
};
use std::rc::Rc;
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod utils;

use components::{render_notice, FavoriteItem, MealCard, MealPopup};
use config::{SCROLL_RESET_DELAY_MS, SEARCH_PLACEHOLDER};
use hooks::{use_favorites, use_search_input};
use utils::{favorites_title, reconcile_mode_for_device, reset_scroll};

/// A card in the results area.
#[derive(Clone, PartialEq)]
struct ResultCard {
    meal: MealRecord,
    is_random: bool,
}

#[derive(Clone, PartialEq)]
enum ResultsView {
    Cards(Vec<ResultCard>),
    Notice { message: String, is_error: bool },
}

impl From<SearchOutcome> for ResultsView {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Meals(meals) => ResultsView::Cards(
                meals
                    .into_iter()
                    .map(|meal| ResultCard {
                        meal,
                        is_random: false,
                    })
                    .collect(),
            ),
            SearchOutcome::NoResults => ResultsView::Notice {
                message: browse::NO_RESULTS_MESSAGE.to_string(),
                is_error: false,
            },
            SearchOutcome::Failed(message) => ResultsView::Notice {
                message,
                is_error: true,
            },
        }
    }
}

/// Session services, created once per page load.
struct Session {
    remote: Rc<dyn MealLookup>,
    reconciler: Rc<FavoritesReconciler>,
}

impl Session {
    fn start() -> Self {
        let remote: Rc<dyn MealLookup> = Rc::new(MealDbClient::default());
        let store = Rc::new(FavoritesStore::browser());
        let reconciler = FavoritesReconciler::new(remote.clone(), store, MealCache::shared());
        reconciler.set_mode(reconcile_mode_for_device());
        log::info!("Favorites running in {:?} mode", reconciler.mode());
        Self {
            remote,
            reconciler: Rc::new(reconciler),
        }
    }
}

#[function_component(App)]
fn app() -> Html {
    let session = use_memo((), |_| Session::start());
    let remote = session.remote.clone();
    let reconciler = session.reconciler.clone();

    let favorites = use_favorites(reconciler.clone());
    let results = use_state(|| ResultsView::Cards(Vec::new()));
    let popup = use_state(|| None::<MealRecord>);

    // Initial load: random meal first, then the favorites pass
    {
        let remote = remote.clone();
        let results = results.clone();
        let refresh = favorites.refresh.clone();
        let list_ref = favorites.list_ref.clone();
        use_effect_with((), move |_| {
            Timeout::new(SCROLL_RESET_DELAY_MS, move || reset_scroll(&list_ref)).forget();
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(meal) = browse::random_meal(remote.as_ref()).await {
                    results.set(ResultsView::Cards(vec![ResultCard {
                        meal,
                        is_random: true,
                    }]));
                }
                refresh.emit(());
            });
            || ()
        });
    }

    let on_search = {
        let remote = remote.clone();
        let results = results.clone();
        Callback::from(move |term: String| {
            let remote = remote.clone();
            let results = results.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(outcome) = browse::search(remote.as_ref(), &term).await {
                    results.set(outcome.into());
                }
            });
        })
    };
    let search = use_search_input(on_search);

    let open_popup = {
        let popup = popup.clone();
        Callback::from(move |meal: MealRecord| popup.set(Some(meal)))
    };
    let close_popup = {
        let popup = popup.clone();
        Callback::from(move |_: ()| popup.set(None))
    };

    let results_html = match &*results {
        ResultsView::Cards(cards) => cards
            .iter()
            .map(|card| {
                html! {
                    <MealCard
                        key={card.meal.id.clone()}
                        meal={card.meal.clone()}
                        is_random={card.is_random}
                        is_favorite={reconciler.is_favorite(&card.meal.id)}
                        on_toggle_favorite={favorites.toggle_favorite.clone()}
                        on_open={open_popup.clone()}
                    />
                }
            })
            .collect::<Html>(),
        ResultsView::Notice { message, is_error } => render_notice(message, *is_error),
    };

    html! {
        <>
            <div class="mobile-container">
                <header>
                    <input type="text"
                        id="search-term"
                        placeholder={SEARCH_PLACEHOLDER}
                        value={search.text.clone()}
                        oninput={search.on_input.clone()}
                        onkeypress={search.on_keypress.clone()}
                    />
                    <button id="search" onclick={search.on_submit.clone()}>
                        <i class="fas fa-search"></i>
                    </button>
                </header>

                <div class={classes!(
                    "fav-container",
                    favorites.expanded.then_some("expanded"),
                    favorites.has_overflow.then_some("has-overflow"),
                )}>
                    <h3 id="fav-toggle" onclick={favorites.toggle_expanded.clone()}>
                        <span class="fav-count">{ favorites_title(favorites.count) }</span>
                    </h3>
                    <div class="fav-meals" ref={favorites.list_ref.clone()}>
                        <ul id="fav-meals">
                            { favorites.meals.iter().map(|meal| html! {
                                <FavoriteItem
                                    key={meal.id.clone()}
                                    meal={meal.clone()}
                                    on_remove={favorites.remove_favorite.clone()}
                                    on_open={open_popup.clone()}
                                />
                            }).collect::<Html>() }
                        </ul>
                    </div>
                </div>

                <div class="meals" id="meals">
                    { results_html }
                </div>
            </div>

            <MealPopup meal={(*popup).clone()} on_close={close_popup} />
        </>
    }
}

/// Entry point: installs the panic hook and mounts the App component.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
