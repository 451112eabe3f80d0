//! Checkout policy knobs.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Default topic checkout notifications are published to.
pub const DEFAULT_CHECKOUT_TOPIC: &str = "checkout-completed";

/// Default FIFO message group for checkout notifications.
pub const DEFAULT_MESSAGE_GROUP: &str = "checkout";

/// What checkout does with cart entries the catalog no longer knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedGamePolicy {
    /// Fail the checkout with `InvalidState` and write nothing.
    #[default]
    Reject,
    /// Move every cart id into the library; unresolved ids add nothing to the
    /// total.
    Transfer,
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Error)]
#[error("unknown unresolved-game policy {0:?}; expected \"reject\" or \"transfer\"")]
pub struct UnknownPolicy(pub String);

impl FromStr for UnresolvedGamePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "transfer" => Ok(Self::Transfer),
            _ => Err(UnknownPolicy(s.to_owned())),
        }
    }
}

impl fmt::Display for UnresolvedGamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => f.write_str("reject"),
            Self::Transfer => f.write_str("transfer"),
        }
    }
}

/// Settings consumed by the checkout handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    /// Topic checkout notifications go to.
    pub topic: String,
    /// Message group for ordered delivery.
    pub message_group: String,
    /// Handling of cart ids missing from the catalog.
    pub unresolved_games: UnresolvedGamePolicy,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            topic: DEFAULT_CHECKOUT_TOPIC.to_owned(),
            message_group: DEFAULT_MESSAGE_GROUP.to_owned(),
            unresolved_games: UnresolvedGamePolicy::default(),
        }
    }
}
