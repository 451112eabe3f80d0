//! User records, polymorphic over role.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account roles known to the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// A buyer with a cart, library and wishlist.
    Player,
    /// A studio that lists games in the catalog.
    Publisher,
    /// A marketplace operator.
    Admin,
}

impl Role {
    /// Returns the canonical role name as stored and as sent by the gateway.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Publisher => "Publisher",
            Self::Admin => "Admin",
        }
    }

    /// Parses a canonical role name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Player" => Some(Self::Player),
            "Publisher" => Some(Self::Publisher),
            "Admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// A player account. Only players own carts and libraries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// User identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// National tax identifier.
    pub cpf: String,
    /// Games the player owns, in acquisition order.
    pub library: Vec<Uuid>,
    /// Games the player intends to buy, in insertion order.
    pub cart: Vec<Uuid>,
    /// Games the player is watching. Not touched by cart operations.
    pub wishlist: Vec<Uuid>,
    /// Optimistic concurrency token, bumped on every successful update.
    pub version: i64,
}

impl Player {
    /// Creates a player with empty cart, library and wishlist.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            cpf: String::new(),
            library: Vec::new(),
            cart: Vec::new(),
            wishlist: Vec::new(),
            version: 0,
        }
    }

    /// Appends a game to the cart. Duplicates are kept.
    pub fn add_to_cart(&mut self, game_id: Uuid) {
        self.cart.push(game_id);
    }

    /// Removes the first occurrence of `game_id` from the cart.
    ///
    /// Returns `false` (and leaves the cart untouched) when the game is absent.
    pub fn remove_from_cart(&mut self, game_id: Uuid) -> bool {
        match self.cart.iter().position(|id| *id == game_id) {
            Some(index) => {
                self.cart.remove(index);
                true
            }
            None => false,
        }
    }

    /// Moves every cart entry into the library and returns the moved ids.
    pub fn transfer_cart_to_library(&mut self) -> Vec<Uuid> {
        let purchased = std::mem::take(&mut self.cart);
        self.library.extend_from_slice(&purchased);
        purchased
    }
}

/// A publisher account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublisherAccount {
    /// User identifier.
    pub id: Uuid,
    /// Studio name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Optimistic concurrency token.
    pub version: i64,
}

/// An operator account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminAccount {
    /// User identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Optimistic concurrency token.
    pub version: i64,
}

/// A user record as stored by the account subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum User {
    /// A buyer.
    Player(Player),
    /// A catalog publisher.
    Publisher(PublisherAccount),
    /// A marketplace operator.
    Admin(AdminAccount),
}

impl User {
    /// Returns the user identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::Player(p) => p.id,
            Self::Publisher(p) => p.id,
            Self::Admin(a) => a.id,
        }
    }

    /// Returns the role this record carries.
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Player(_) => Role::Player,
            Self::Publisher(_) => Role::Publisher,
            Self::Admin(_) => Role::Admin,
        }
    }

    /// Returns the concurrency token of the record.
    #[must_use]
    pub fn version(&self) -> i64 {
        match self {
            Self::Player(p) => p.version,
            Self::Publisher(p) => p.version,
            Self::Admin(a) => a.version,
        }
    }

    /// Narrows the record to the player role.
    #[must_use]
    pub fn into_player(self) -> Option<Player> {
        match self {
            Self::Player(player) => Some(player),
            Self::Publisher(_) | Self::Admin(_) => None,
        }
    }
}

impl From<Player> for User {
    fn from(player: Player) -> Self {
        Self::Player(player)
    }
}
