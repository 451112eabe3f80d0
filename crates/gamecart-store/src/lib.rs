//! `PostgreSQL` implementations of the `GameCart` repository and publisher
//! ports.

use gamecart_core::error::DomainError;
use sqlx::migrate::Migrator;

pub mod pg_game_repository;
pub mod pg_outbox_publisher;
pub mod pg_user_repository;

/// Schema migrations for the users, games and outbox tables.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Maps a driver error to a `PersistenceFailure` carrying only the message.
pub(crate) fn persistence_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::PersistenceFailure(format!("{context}: {e}"))
}
