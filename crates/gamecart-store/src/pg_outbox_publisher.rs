//! Outbox-backed `NotificationPublisher`.
//!
//! Publishing writes the message to the `notification_outbox` table. A relay
//! outside this service forwards pending rows to the broker and stamps
//! `published_at`. Re-publishing a message id is a no-op, so a relay can
//! deliver at-least-once while consumers deduplicate on `message_id`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use gamecart_core::error::DomainError;
use gamecart_core::publisher::{NotificationMessage, NotificationPublisher};

use crate::persistence_error;

/// A row of the outbox that has not been relayed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingNotification {
    /// Destination topic.
    pub topic: String,
    /// The stored message.
    pub message: NotificationMessage,
}

#[derive(Debug, FromRow)]
struct OutboxRow {
    message_id: Uuid,
    topic: String,
    message_group: String,
    event_type: String,
    payload: serde_json::Value,
    created_at: DateTime<Utc>,
}

/// Publisher that durably records notifications in `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgOutboxPublisher {
    pool: PgPool,
}

impl PgOutboxPublisher {
    /// Creates a new `PgOutboxPublisher`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns up to `limit` unrelayed notifications, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PersistenceFailure` if the query fails.
    pub async fn pending(&self, limit: i64) -> Result<Vec<PendingNotification>, DomainError> {
        let rows = sqlx::query_as::<_, OutboxRow>(
            "SELECT message_id, topic, message_group, event_type, payload, created_at \
             FROM notification_outbox WHERE published_at IS NULL \
             ORDER BY created_at, message_id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(persistence_error("outbox read failed"))?;

        Ok(rows
            .into_iter()
            .map(|row| PendingNotification {
                topic: row.topic,
                message: NotificationMessage {
                    message_id: row.message_id,
                    message_group: row.message_group,
                    event_type: row.event_type,
                    payload: row.payload,
                    created_at: row.created_at,
                },
            })
            .collect())
    }
}

#[async_trait]
impl NotificationPublisher for PgOutboxPublisher {
    async fn publish(
        &self,
        topic: &str,
        message: &NotificationMessage,
    ) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO notification_outbox \
             (message_id, topic, message_group, event_type, payload, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (message_id) DO NOTHING",
        )
        .bind(message.message_id)
        .bind(topic)
        .bind(&message.message_group)
        .bind(&message.event_type)
        .bind(&message.payload)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(persistence_error("outbox write failed"))?;

        debug!(message_id = %message.message_id, %topic, "notification written to outbox");
        Ok(())
    }
}
