//! Recording and failing `NotificationPublisher`s.

use std::sync::Mutex;

use async_trait::async_trait;
use gamecart_core::error::DomainError;
use gamecart_core::publisher::{NotificationMessage, NotificationPublisher};

/// A publisher that records every `(topic, message)` pair and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<(String, NotificationMessage)>>,
}

impl RecordingPublisher {
    /// Create an empty recording publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all published messages.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn published(&self) -> Vec<(String, NotificationMessage)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationPublisher for RecordingPublisher {
    async fn publish(
        &self,
        topic: &str,
        message: &NotificationMessage,
    ) -> Result<(), DomainError> {
        self.published
            .lock()
            .unwrap()
            .push((topic.to_owned(), message.clone()));
        Ok(())
    }
}

/// A publisher whose every call fails. Counts attempts.
#[derive(Debug, Default)]
pub struct FailingPublisher {
    attempts: Mutex<usize>,
}

impl FailingPublisher {
    /// Create a failing publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `publish` calls made so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl NotificationPublisher for FailingPublisher {
    async fn publish(
        &self,
        _topic: &str,
        _message: &NotificationMessage,
    ) -> Result<(), DomainError> {
        *self.attempts.lock().unwrap() += 1;
        Err(DomainError::PersistenceFailure("topic unreachable".into()))
    }
}
