//! Repository abstractions over the user and catalog stores.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;
use crate::game::Game;
use crate::user::User;

/// Repository trait for reading and updating user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load a user by identifier. Returns `Ok(None)` when no record exists.
    async fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>, DomainError>;

    /// Persist an updated user record with optimistic concurrency.
    ///
    /// The write only succeeds if the stored version still equals
    /// `user.version()`; the stored version is then incremented.
    async fn update(&self, user: &User) -> Result<(), DomainError>;
}

/// Read-only repository trait over the game catalog.
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Load a single game. Returns `Ok(None)` when the catalog has no entry.
    async fn get_by_id(&self, game_id: Uuid) -> Result<Option<Game>, DomainError>;

    /// Load every game whose identifier appears in `game_ids`.
    ///
    /// Unknown identifiers are silently omitted. Order is implementation-defined.
    async fn get_by_ids(&self, game_ids: &[Uuid]) -> Result<Vec<Game>, DomainError>;
}
