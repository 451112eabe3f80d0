//! Query handlers for the Cart & Checkout context.

use gamecart_core::error::DomainError;
use gamecart_core::game::{Game, total_price};
use gamecart_core::repository::{GameRepository, UserRepository};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::command_handlers::load_player;

/// Read-only view of a player's cart.
#[derive(Debug, Serialize)]
pub struct CartView {
    /// The player.
    pub user_id: Uuid,
    /// Catalog entries for the cart ids, in the order the catalog returned
    /// them. Ids the catalog does not know are omitted.
    pub games: Vec<Game>,
    /// Sum of the listed games' prices.
    pub total_price: f64,
}

/// Retrieves the games in a player's cart.
///
/// # Errors
///
/// Returns `DomainError::UserNotFound` if the player does not exist, or the
/// repository's error if a lookup fails.
pub async fn get_cart(
    user_id: Uuid,
    users: &dyn UserRepository,
    games: &dyn GameRepository,
) -> Result<CartView, DomainError> {
    info!(%user_id, "fetching cart");

    let player = match load_player(user_id, users).await {
        Ok(player) => player,
        Err(e) => {
            warn!(%user_id, error = %e, "cart lookup rejected");
            return Err(e);
        }
    };

    let listed = if player.cart.is_empty() {
        Vec::new()
    } else {
        games.get_by_ids(&player.cart).await?
    };

    info!(%user_id, count = listed.len(), "returning cart");
    Ok(CartView {
        user_id,
        total_price: total_price(&listed),
        games: listed,
    })
}

#[cfg(test)]
mod tests {
    use gamecart_core::error::DomainError;
    use gamecart_test_support::{
        FailingUserRepository, InMemoryGameRepository, InMemoryUserRepository, game_priced,
        player_with_cart,
    };
    use uuid::Uuid;

    use crate::application::command_handlers::handle_add_to_cart;
    use crate::application::query_handlers::get_cart;
    use crate::domain::commands::AddToCart;

    #[tokio::test]
    async fn test_get_cart_returns_resolved_games() {
        // Arrange
        let user_id = Uuid::new_v4();
        let g1 = Uuid::new_v4();
        let g2 = Uuid::new_v4();
        let users = InMemoryUserRepository::with_player(player_with_cart(user_id, vec![g2, g1]));
        let games = InMemoryGameRepository::new(vec![game_priced(g1, 10.0), game_priced(g2, 5.0)]);

        // Act
        let view = get_cart(user_id, &users, &games).await.unwrap();

        // Assert: catalog order, not cart order.
        let ids: Vec<Uuid> = view.games.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![g1, g2]);
        assert!((view.total_price - 15.0).abs() < f64::EPSILON);
        assert!(users.updates().is_empty());
    }

    #[tokio::test]
    async fn test_get_cart_omits_games_missing_from_catalog() {
        let user_id = Uuid::new_v4();
        let known = Uuid::new_v4();
        let users = InMemoryUserRepository::with_player(player_with_cart(
            user_id,
            vec![known, Uuid::new_v4()],
        ));
        let games = InMemoryGameRepository::new(vec![game_priced(known, 10.0)]);

        let view = get_cart(user_id, &users, &games).await.unwrap();

        assert_eq!(view.games.len(), 1);
        assert_eq!(view.games[0].id, known);
    }

    #[tokio::test]
    async fn test_get_cart_with_empty_cart_skips_catalog() {
        let user_id = Uuid::new_v4();
        let users = InMemoryUserRepository::with_player(player_with_cart(user_id, vec![]));
        let games = InMemoryGameRepository::default();

        let view = get_cart(user_id, &users, &games).await.unwrap();

        assert!(view.games.is_empty());
        assert!(games.batch_lookups().is_empty());
    }

    #[tokio::test]
    async fn test_get_cart_returns_not_found_for_missing_user() {
        let result = get_cart(
            Uuid::new_v4(),
            &InMemoryUserRepository::new(),
            &InMemoryGameRepository::default(),
        )
        .await;

        assert!(matches!(result, Err(DomainError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_get_cart_propagates_repository_failure() {
        let result = get_cart(
            Uuid::new_v4(),
            &FailingUserRepository,
            &InMemoryGameRepository::default(),
        )
        .await;

        assert!(matches!(result, Err(DomainError::PersistenceFailure(_))));
    }

    #[tokio::test]
    async fn test_added_game_appears_in_cart() {
        // Arrange
        let user_id = Uuid::new_v4();
        let game_id = Uuid::new_v4();
        let users = InMemoryUserRepository::with_player(player_with_cart(user_id, vec![]));
        let games = InMemoryGameRepository::new(vec![game_priced(game_id, 20.0)]);

        // Act
        handle_add_to_cart(
            &AddToCart {
                correlation_id: Uuid::new_v4(),
                user_id,
                game_id,
            },
            &users,
        )
        .await
        .unwrap();
        let view = get_cart(user_id, &users, &games).await.unwrap();

        // Assert
        assert!(view.games.iter().any(|g| g.id == game_id));
    }
}
