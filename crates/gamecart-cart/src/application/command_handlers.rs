//! Command handlers for the Cart & Checkout context.
//!
//! Each handler loads the player, applies the change, and persists the
//! record. Checkout additionally prices the cart against the catalog and
//! publishes a `CheckoutCompleted` notification once the write succeeded.

use chrono::{DateTime, Utc};
use gamecart_core::clock::Clock;
use gamecart_core::error::DomainError;
use gamecart_core::game::total_price;
use gamecart_core::publisher::NotificationPublisher;
use gamecart_core::repository::{GameRepository, UserRepository};
use gamecart_core::user::{Player, User};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::commands::{AddToCart, Checkout, DeleteFromCart};
use crate::domain::events::CheckoutCompleted;
use crate::domain::settings::{CheckoutSettings, UnresolvedGamePolicy};

/// Result of a successfully handled cart mutation.
#[derive(Debug, Clone, Serialize)]
pub struct CartCommandResult {
    /// The player whose cart changed.
    pub user_id: Uuid,
    /// The cart as persisted.
    pub cart: Vec<Uuid>,
}

/// Outcome of the post-commit notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotificationStatus {
    /// The publisher accepted the message.
    Published {
        /// Identifier of the published message.
        message_id: Uuid,
    },
    /// The publisher failed. The purchase itself is committed.
    Failed {
        /// The publisher's error message.
        reason: String,
    },
}

/// Result of a successful checkout.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutReceipt {
    /// The purchasing player.
    pub user_id: Uuid,
    /// The games moved into the library.
    pub game_ids: Vec<Uuid>,
    /// Sum of the resolved catalog prices.
    pub total_price: f64,
    /// Purchase timestamp.
    pub purchase_date: DateTime<Utc>,
    /// Whether the purchase notification went out.
    pub notification: NotificationStatus,
}

/// Loads a user and narrows it to the player role.
///
/// Non-player records are reported exactly like missing ones.
///
/// # Errors
///
/// Returns `DomainError::UserNotFound` if no player exists with `user_id`.
pub(crate) async fn load_player(
    user_id: Uuid,
    users: &dyn UserRepository,
) -> Result<Player, DomainError> {
    users
        .get_by_id(user_id)
        .await?
        .and_then(User::into_player)
        .ok_or(DomainError::UserNotFound(user_id))
}

/// Handles the `AddToCart` command: loads the player, appends the game to the
/// cart, and persists the record.
///
/// # Errors
///
/// Returns `DomainError::UserNotFound` if the player does not exist, or the
/// repository's error if the write fails.
pub async fn handle_add_to_cart(
    command: &AddToCart,
    users: &dyn UserRepository,
) -> Result<CartCommandResult, DomainError> {
    info!(user_id = %command.user_id, game_id = %command.game_id, "adding game to cart");

    let mut player = match load_player(command.user_id, users).await {
        Ok(player) => player,
        Err(e) => {
            warn!(user_id = %command.user_id, game_id = %command.game_id, error = %e, "add to cart rejected");
            return Err(e);
        }
    };

    player.add_to_cart(command.game_id);
    let cart = player.cart.clone();

    if let Err(e) = users.update(&User::Player(player)).await {
        error!(user_id = %command.user_id, game_id = %command.game_id, error = %e, "failed to persist cart");
        return Err(e);
    }

    info!(user_id = %command.user_id, game_id = %command.game_id, "game added to cart");
    Ok(CartCommandResult {
        user_id: command.user_id,
        cart,
    })
}

/// Handles the `DeleteFromCart` command: loads the player, removes the first
/// occurrence of the game from the cart, and persists the record.
///
/// # Errors
///
/// Returns `DomainError::UserNotFound` if the player does not exist,
/// `DomainError::GameNotInCart` if the game is not in the cart, or the
/// repository's error if the write fails.
pub async fn handle_delete_from_cart(
    command: &DeleteFromCart,
    users: &dyn UserRepository,
) -> Result<CartCommandResult, DomainError> {
    info!(user_id = %command.user_id, game_id = %command.game_id, "removing game from cart");

    let mut player = match load_player(command.user_id, users).await {
        Ok(player) => player,
        Err(e) => {
            warn!(user_id = %command.user_id, game_id = %command.game_id, error = %e, "remove from cart rejected");
            return Err(e);
        }
    };

    if !player.remove_from_cart(command.game_id) {
        warn!(user_id = %command.user_id, game_id = %command.game_id, "game is not in cart");
        return Err(DomainError::GameNotInCart {
            user_id: command.user_id,
            game_id: command.game_id,
        });
    }
    let cart = player.cart.clone();

    if let Err(e) = users.update(&User::Player(player)).await {
        error!(user_id = %command.user_id, game_id = %command.game_id, error = %e, "failed to persist cart");
        return Err(e);
    }

    info!(user_id = %command.user_id, game_id = %command.game_id, "game removed from cart");
    Ok(CartCommandResult {
        user_id: command.user_id,
        cart,
    })
}

/// Handles the `Checkout` command.
///
/// Prices the cart with one batch catalog lookup, moves every cart entry into
/// the library, persists the player, and then publishes `CheckoutCompleted`.
/// A failed write aborts before anything is published. A failed publish does
/// not undo the committed transfer; it is logged and reported on the receipt.
///
/// # Errors
///
/// Returns `DomainError::UserNotFound` if the player does not exist,
/// `DomainError::InvalidState` if the cart is empty or (under
/// `UnresolvedGamePolicy::Reject`) holds games missing from the catalog, or
/// the repository's error if the catalog lookup or the write fails.
pub async fn handle_checkout(
    command: &Checkout,
    settings: &CheckoutSettings,
    clock: &dyn Clock,
    users: &dyn UserRepository,
    games: &dyn GameRepository,
    publisher: &dyn NotificationPublisher,
) -> Result<CheckoutReceipt, DomainError> {
    info!(user_id = %command.user_id, correlation_id = %command.correlation_id, "starting checkout");

    let mut player = match load_player(command.user_id, users).await {
        Ok(player) => player,
        Err(e) => {
            warn!(user_id = %command.user_id, error = %e, "checkout rejected");
            return Err(e);
        }
    };

    if player.cart.is_empty() {
        warn!(user_id = %command.user_id, "checkout attempted with an empty cart");
        return Err(DomainError::InvalidState(format!(
            "cart of user {} is empty",
            command.user_id
        )));
    }

    let resolved = games.get_by_ids(&player.cart).await?;
    let unresolved: Vec<Uuid> = player
        .cart
        .iter()
        .copied()
        .filter(|id| !resolved.iter().any(|g| g.id == *id))
        .collect();
    if !unresolved.is_empty() {
        match settings.unresolved_games {
            UnresolvedGamePolicy::Reject => {
                warn!(user_id = %command.user_id, ?unresolved, "cart holds games missing from the catalog");
                return Err(DomainError::InvalidState(format!(
                    "cart of user {} holds games missing from the catalog: {unresolved:?}",
                    command.user_id
                )));
            }
            UnresolvedGamePolicy::Transfer => {
                warn!(user_id = %command.user_id, ?unresolved, "transferring games missing from the catalog at no charge");
            }
        }
    }

    let total = total_price(&resolved);

    let games_purchased = player.transfer_cart_to_library();
    let user_email = player.email.clone();
    let user_name = player.name.clone();

    if let Err(e) = users.update(&User::Player(player)).await {
        error!(user_id = %command.user_id, error = %e, "failed to persist checkout");
        return Err(e);
    }
    info!(user_id = %command.user_id, games = games_purchased.len(), total_price = total, "checkout committed");

    let event = CheckoutCompleted {
        user_id: command.user_id,
        user_email,
        user_name,
        game_ids: games_purchased.clone(),
        total_price: total,
        purchase_date: clock.now(),
    };
    let notification = publish_checkout(&event, Uuid::new_v4(), settings, publisher).await;

    Ok(CheckoutReceipt {
        user_id: command.user_id,
        game_ids: games_purchased,
        total_price: total,
        purchase_date: event.purchase_date,
        notification,
    })
}

async fn publish_checkout(
    event: &CheckoutCompleted,
    message_id: Uuid,
    settings: &CheckoutSettings,
    publisher: &dyn NotificationPublisher,
) -> NotificationStatus {
    let result = match event.to_notification(message_id, &settings.message_group) {
        Ok(message) => publisher.publish(&settings.topic, &message).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => {
            info!(user_id = %event.user_id, topic = %settings.topic, %message_id, "checkout notification published");
            NotificationStatus::Published { message_id }
        }
        Err(e) => {
            error!(user_id = %event.user_id, topic = %settings.topic, error = %e, "checkout committed but notification failed");
            NotificationStatus::Failed {
                reason: e.to_string(),
            }
        }
    }
}
