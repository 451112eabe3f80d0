//! Domain events for the Cart & Checkout context.

use chrono::{DateTime, Utc};
use gamecart_core::error::DomainError;
use gamecart_core::publisher::NotificationMessage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type name for a completed checkout.
pub const CHECKOUT_COMPLETED_EVENT_TYPE: &str = "cart.checkout_completed";

/// Emitted once per successful checkout, after the library transfer has been
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckoutCompleted {
    /// The purchasing player.
    pub user_id: Uuid,
    /// The player's email at purchase time.
    pub user_email: String,
    /// The player's name at purchase time.
    pub user_name: String,
    /// The games moved into the library, in cart order.
    pub game_ids: Vec<Uuid>,
    /// Sum of the catalog prices of the purchased games.
    pub total_price: f64,
    /// Event creation time.
    pub purchase_date: DateTime<Utc>,
}

impl CheckoutCompleted {
    /// Wraps the event in a publishable message.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PersistenceFailure` if the payload cannot be
    /// serialized.
    pub fn to_notification(
        &self,
        message_id: Uuid,
        message_group: &str,
    ) -> Result<NotificationMessage, DomainError> {
        let payload = serde_json::to_value(self).map_err(|e| {
            DomainError::PersistenceFailure(format!("event serialization failed: {e}"))
        })?;
        Ok(NotificationMessage {
            message_id,
            message_group: message_group.to_owned(),
            event_type: CHECKOUT_COMPLETED_EVENT_TYPE.to_owned(),
            payload,
            created_at: self.purchase_date,
        })
    }
}
