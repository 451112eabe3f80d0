//! Notification publisher abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// A structured message handed to a durable topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Unique message identifier, usable for consumer-side deduplication.
    pub message_id: Uuid,
    /// Ordering group for FIFO topics.
    pub message_group: String,
    /// Type name for consumer routing.
    pub event_type: String,
    /// Flat JSON payload.
    pub payload: serde_json::Value,
    /// Timestamp of message creation.
    pub created_at: DateTime<Utc>,
}

/// Publishes notifications to named topics.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Publish `message` to `topic`.
    async fn publish(&self, topic: &str, message: &NotificationMessage)
    -> Result<(), DomainError>;
}
