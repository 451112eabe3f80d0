//! Shared application state.

use std::sync::Arc;

use gamecart_cart::domain::settings::CheckoutSettings;
use gamecart_core::clock::Clock;
use gamecart_core::publisher::NotificationPublisher;
use gamecart_core::repository::{GameRepository, UserRepository};

/// Application state shared across all request handlers. Built once at
/// startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Clock for purchase timestamps.
    pub clock: Arc<dyn Clock>,
    /// User store.
    pub users: Arc<dyn UserRepository>,
    /// Catalog reader.
    pub games: Arc<dyn GameRepository>,
    /// Checkout notification sink.
    pub publisher: Arc<dyn NotificationPublisher>,
    /// Checkout topic and policy.
    pub checkout: Arc<CheckoutSettings>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        users: Arc<dyn UserRepository>,
        games: Arc<dyn GameRepository>,
        publisher: Arc<dyn NotificationPublisher>,
        checkout: CheckoutSettings,
    ) -> Self {
        Self {
            clock,
            users,
            games,
            publisher,
            checkout: Arc::new(checkout),
        }
    }
}
