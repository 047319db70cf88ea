//! Application-level configuration constants.

// Scroll behaviour
pub const SCROLL_RESET_DELAY_MS: u32 = 100;
pub const COLLAPSE_SCROLL_RESET_DELAY_MS: u32 = 50;
pub const OVERFLOW_CHECK_DELAY_MS: u32 = 100;

// Devices at or below this viewport width use incremental favorites updates
pub const MOBILE_MAX_WIDTH_PX: f64 = 500.0;

// UI text
pub const FAVORITES_TITLE: &str = "Favorite Meals";
pub const RANDOM_BADGE: &str = "Random Recipe";
pub const SEARCH_PLACEHOLDER: &str = "Search for recipes";
