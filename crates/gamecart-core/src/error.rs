//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// The three failure categories callers are expected to distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The user, or a game within the user's cart, does not exist.
    NotFound,
    /// The operation is not allowed in the current state.
    InvalidState,
    /// A write (or publish) against a collaborator failed.
    PersistenceFailure,
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No player exists with the given identifier.
    #[error("user not found: {0}")]
    UserNotFound(Uuid),

    /// The game is not present in the player's cart.
    #[error("game {game_id} is not in the cart of user {user_id}")]
    GameNotInCart {
        /// The player whose cart was searched.
        user_id: Uuid,
        /// The game that was not found.
        game_id: Uuid,
    },

    /// The operation is forbidden in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The user record changed between read and conditional write.
    #[error("concurrency conflict on user {user_id}: expected version {expected_version}")]
    ConcurrencyConflict {
        /// The user whose record was concurrently modified.
        user_id: Uuid,
        /// The version the writer read.
        expected_version: i64,
    },

    /// A storage or messaging collaborator failed.
    #[error("persistence failure: {0}")]
    PersistenceFailure(String),
}

impl DomainError {
    /// Classifies the error into the caller-facing taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound(_) | Self::GameNotInCart { .. } => ErrorKind::NotFound,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::ConcurrencyConflict { .. } | Self::PersistenceFailure(_) => {
                ErrorKind::PersistenceFailure
            }
        }
    }
}
