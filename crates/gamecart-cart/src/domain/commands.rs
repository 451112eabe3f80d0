//! Commands for the Cart & Checkout context.

use uuid::Uuid;

/// Command to append a game to a player's cart.
#[derive(Debug, Clone)]
pub struct AddToCart {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The authenticated player.
    pub user_id: Uuid,
    /// The game to add.
    pub game_id: Uuid,
}

/// Command to remove a game from a player's cart.
#[derive(Debug, Clone)]
pub struct DeleteFromCart {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The authenticated player.
    pub user_id: Uuid,
    /// The game to remove.
    pub game_id: Uuid,
}

/// Command to purchase everything in a player's cart.
#[derive(Debug, Clone)]
pub struct Checkout {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The authenticated player.
    pub user_id: Uuid,
}
