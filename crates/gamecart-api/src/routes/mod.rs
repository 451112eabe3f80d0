//! Route modules.

use axum::Router;

use crate::state::AppState;

pub mod cart;
pub mod health;

/// Builds the full application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/cart", cart::router())
        .with_state(state)
}
