//! Term meta keys written by the swatch endpoint.

/// Key read by the WCBoost variation swatches plugin.
pub const WCBOOST_SWATCHES_COLOR: &str = "_wcboost_variation_swatches_color";

/// Key read by the generic variation swatches plugin.
pub const SWATCHES_COLOR: &str = "swatches_color";

/// Both color keys, in write order.
pub const SWATCH_COLOR_KEYS: [&str; 2] = [WCBOOST_SWATCHES_COLOR, SWATCHES_COLOR];
