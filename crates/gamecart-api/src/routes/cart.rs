//! Routes for the Cart & Checkout bounded context.

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use gamecart_cart::application::command_handlers::{
    self, CartCommandResult, CheckoutReceipt,
};
use gamecart_cart::application::query_handlers::{self, CartView};
use gamecart_cart::domain::commands;

use crate::error::ApiError;
use crate::identity::AuthenticatedPlayer;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    /// The game to add.
    pub game_id: Uuid,
}

/// POST /
#[instrument(skip(state, player, request), fields(user_id = %player.user_id, game_id = %request.game_id))]
async fn add_to_cart(
    State(state): State<AppState>,
    player: AuthenticatedPlayer,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartCommandResult>, ApiError> {
    let command = commands::AddToCart {
        correlation_id: Uuid::new_v4(),
        user_id: player.user_id,
        game_id: request.game_id,
    };

    info!(correlation_id = %command.correlation_id, "handling add_to_cart command");

    let result = command_handlers::handle_add_to_cart(&command, &*state.users).await?;

    Ok(Json(result))
}

/// DELETE /{game_id}
#[instrument(skip(state, player), fields(user_id = %player.user_id))]
async fn delete_from_cart(
    State(state): State<AppState>,
    player: AuthenticatedPlayer,
    Path(game_id): Path<Uuid>,
) -> Result<Json<CartCommandResult>, ApiError> {
    let command = commands::DeleteFromCart {
        correlation_id: Uuid::new_v4(),
        user_id: player.user_id,
        game_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_from_cart command");

    let result = command_handlers::handle_delete_from_cart(&command, &*state.users).await?;

    Ok(Json(result))
}

/// GET /
#[instrument(skip(state, player), fields(user_id = %player.user_id))]
async fn get_cart(
    State(state): State<AppState>,
    player: AuthenticatedPlayer,
) -> Result<Json<CartView>, ApiError> {
    let view = query_handlers::get_cart(player.user_id, &*state.users, &*state.games).await?;

    Ok(Json(view))
}

/// POST /checkout
#[instrument(skip(state, player), fields(user_id = %player.user_id))]
async fn checkout(
    State(state): State<AppState>,
    player: AuthenticatedPlayer,
) -> Result<Json<CheckoutReceipt>, ApiError> {
    let command = commands::Checkout {
        correlation_id: Uuid::new_v4(),
        user_id: player.user_id,
    };

    info!(correlation_id = %command.correlation_id, "handling checkout command");

    let receipt = command_handlers::handle_checkout(
        &command,
        &state.checkout,
        state.clock.as_ref(),
        &*state.users,
        &*state.games,
        &*state.publisher,
    )
    .await?;

    Ok(Json(receipt))
}

/// Returns the router for the cart context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).post(add_to_cart))
        .route("/checkout", post(checkout))
        .route("/{game_id}", delete(delete_from_cart))
}
