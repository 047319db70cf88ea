use crate::config::{FAVORITES_TITLE, MOBILE_MAX_WIDTH_PX};
use log::warn;
use meal_favorites::ReconcileMode;
use once_cell::sync::Lazy;
use regex::Regex;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, ScrollBehavior, ScrollToOptions};
use yew::NodeRef;

static MOBILE_USER_AGENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini").unwrap()
});

/// True for narrow viewports or mobile user agents.
pub fn is_constrained_device() -> bool {
    let window = gloo_utils::window();
    let narrow = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .is_some_and(|w| w <= MOBILE_MAX_WIDTH_PX);
    let mobile_agent = window
        .navigator()
        .user_agent()
        .map(|ua| is_mobile_user_agent(&ua))
        .unwrap_or(false);
    narrow || mobile_agent
}

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    MOBILE_USER_AGENT_REGEX.is_match(user_agent)
}

/// Reconciliation strategy for the current device.
pub fn reconcile_mode_for_device() -> ReconcileMode {
    if is_constrained_device() {
        ReconcileMode::Incremental
    } else {
        ReconcileMode::Full
    }
}

/// Header text for the favorites panel.
pub fn favorites_title(count: usize) -> String {
    if count > 0 {
        format!("{} ({})", FAVORITES_TITLE, count)
    } else {
        FAVORITES_TITLE.to_string()
    }
}

pub fn scroll_top(list: &NodeRef) -> i32 {
    list.cast::<Element>().map(|el| el.scroll_top()).unwrap_or(0)
}

/// Smoothly scroll the favorites list back to its start.
pub fn reset_scroll(list: &NodeRef) {
    if let Some(el) = list.cast::<Element>() {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        el.scroll_to_with_scroll_to_options(&options);
    }
}

/// Put the list back at `offset` once the next frame has been laid out.
pub fn restore_scroll(list: &NodeRef, offset: i32) {
    if offset <= 0 {
        return;
    }
    let list = list.clone();
    let callback = Closure::once_into_js(move || {
        if let Some(el) = list.cast::<Element>() {
            el.set_scroll_top(offset);
        }
    });
    if let Err(e) =
        gloo_utils::window().request_animation_frame(callback.unchecked_ref::<js_sys::Function>())
    {
        warn!("Failed to schedule favorites scroll restore: {:?}", e);
    }
}

/// Whether the collapsed list hides content below the fold.
pub fn has_overflow(list: &NodeRef, expanded: bool) -> bool {
    if expanded {
        return false;
    }
    list.cast::<Element>()
        .map(|el| el.scroll_height() > el.client_height())
        .unwrap_or(false)
}
