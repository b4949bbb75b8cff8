//! Application state shared across all request handlers.

use storefront_core::config::SharedConfig;
use storefront_core::review::OrderReview;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration (sections can be reloaded via SIGHUP).
    pub config: SharedConfig,
    /// Order listing and ownership-gated lookup.
    pub review: OrderReview,
}

impl AppState {
    /// Create a new AppState with the given configuration and review service.
    pub fn new(config: SharedConfig, review: OrderReview) -> Self {
        Self { config, review }
    }
}
