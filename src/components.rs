//! Pure Yew view components for the recipe UI.
//!
//! Components render from props only; every state change goes through
//! callbacks owned by the `App` component.

use crate::config::RANDOM_BADGE;
use meal_favorites::{MealId, MealRecord};
use yew::prelude::*;

/// A meal card in the results area.
#[derive(Properties, PartialEq)]
pub struct MealCardProps {
    pub meal: MealRecord,
    #[prop_or_default]
    pub is_random: bool,
    pub is_favorite: bool,
    pub on_toggle_favorite: Callback<MealId>,
    pub on_open: Callback<MealRecord>,
}

#[function_component(MealCard)]
pub fn meal_card(props: &MealCardProps) -> Html {
    let onclick = {
        let meal = props.meal.clone();
        let on_open = props.on_open.clone();
        Callback::from(move |_: MouseEvent| on_open.emit(meal.clone()))
    };

    let on_heart = {
        let id = props.meal.id.clone();
        let on_toggle = props.on_toggle_favorite.clone();
        Callback::from(move |e: MouseEvent| {
            // Keep the click from opening the popup.
            e.stop_propagation();
            on_toggle.emit(id.clone());
        })
    };

    html! {
        <div class="meal" {onclick}>
            <div class="meal-header">
                if props.is_random {
                    <span class="random">{ RANDOM_BADGE }</span>
                }
                <img src={props.meal.thumbnail_url().to_string()} alt={props.meal.name.clone()} />
            </div>
            <div class="meal-body">
                <h4>{ props.meal.name.clone() }</h4>
                <button class={classes!("fav-btn", props.is_favorite.then_some("active"))}
                    onclick={on_heart}>
                    <i class="fas fa-heart"></i>
                </button>
            </div>
        </div>
    }
}

/// One entry of the favorites strip.
#[derive(Properties, PartialEq)]
pub struct FavoriteItemProps {
    pub meal: MealRecord,
    pub on_remove: Callback<MealId>,
    pub on_open: Callback<MealRecord>,
}

#[function_component(FavoriteItem)]
pub fn favorite_item(props: &FavoriteItemProps) -> Html {
    let onclick = {
        let meal = props.meal.clone();
        let on_open = props.on_open.clone();
        Callback::from(move |_: MouseEvent| on_open.emit(meal.clone()))
    };

    let on_clear = {
        let id = props.meal.id.clone();
        let on_remove = props.on_remove.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_remove.emit(id.clone());
        })
    };

    html! {
        <li data-meal-id={props.meal.id.clone()} {onclick}>
            <img src={props.meal.thumbnail_url().to_string()} alt={props.meal.name.clone()} />
            <span>{ props.meal.name.clone() }</span>
            <button class="clear" onclick={on_clear}>
                <i class="fas fa-window-close"></i>
            </button>
        </li>
    }
}

/// Detail popup with instructions and ingredients.
#[derive(Properties, PartialEq)]
pub struct MealPopupProps {
    pub meal: Option<MealRecord>,
    pub on_close: Callback<()>,
}

#[function_component(MealPopup)]
pub fn meal_popup(props: &MealPopupProps) -> Html {
    let on_close_button = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    // Clicks on the backdrop close the popup, clicks inside it do not.
    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            if e.target() == e.current_target() {
                on_close.emit(());
            }
        })
    };

    let Some(meal) = &props.meal else {
        return html! { <div class="meal-popup hidden" id="meal-popup"></div> };
    };

    html! {
        <div class="meal-popup" id="meal-popup" onclick={on_backdrop}>
            <div class="popup-container">
                <button class="close-popup" id="close-popup" onclick={on_close_button}>
                    <i class="fas fa-times"></i>
                </button>
                <div class="meal-info" id="meal-info">
                    <h1>{ meal.name.clone() }</h1>
                    <img src={meal.thumbnail_url().to_string()} alt={meal.name.clone()} />
                    <p>{ meal.instructions.clone().unwrap_or_default() }</p>
                    <h3>{ "Ingredients:" }</h3>
                    <ul>
                        { meal.ingredients().iter().map(|ingredient| html! {
                            <li>{ ingredient.to_string() }</li>
                        }).collect::<Html>() }
                    </ul>
                </div>
            </div>
        </div>
    }
}

/// Renders a notice in place of search results.
pub fn render_notice(message: &str, is_error: bool) -> Html {
    let class = if is_error { "error-message" } else { "no-results" };
    html! {
        <div {class}>
            <p>{ message.to_string() }</p>
        </div>
    }
}
