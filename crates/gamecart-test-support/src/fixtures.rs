//! Record builders shared across test suites.

use chrono::{DateTime, TimeZone, Utc};
use gamecart_core::game::{Game, GameGenre, GameTag};
use gamecart_core::user::Player;
use uuid::Uuid;

/// Fixed timestamp used across tests.
///
/// # Panics
///
/// Never; the date is a valid literal.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// A catalog entry with the given id and price.
#[must_use]
pub fn game_priced(id: Uuid, price: f64) -> Game {
    Game {
        id,
        title: format!("Game {id}"),
        publisher_id: Uuid::nil(),
        description: "A game".to_owned(),
        price,
        release_date: fixed_now(),
        genres: vec![GameGenre::Action],
        tags: vec![GameTag::Singleplayer],
    }
}

/// A player whose cart holds `cart`, with empty library and wishlist.
#[must_use]
pub fn player_with_cart(id: Uuid, cart: Vec<Uuid>) -> Player {
    let mut player = Player::new(id, "Ana", "ana@example.com");
    player.cart = cart;
    player
}
