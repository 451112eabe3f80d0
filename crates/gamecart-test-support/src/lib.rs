//! Shared test doubles and fixtures for the `GameCart` service.

mod clock;
mod fixtures;
mod publisher;
mod repository;

pub use clock::FixedClock;
pub use fixtures::{fixed_now, game_priced, player_with_cart};
pub use publisher::{FailingPublisher, RecordingPublisher};
pub use repository::{
    FailingGameRepository, FailingUserRepository, InMemoryGameRepository, InMemoryUserRepository,
};
