//! Environment-driven server configuration.

use std::net::SocketAddr;

use gamecart_cart::domain::settings::{
    CheckoutSettings, DEFAULT_CHECKOUT_TOPIC, DEFAULT_MESSAGE_GROUP, UnresolvedGamePolicy,
};

use crate::error::AppError;

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Maximum pool size.
    pub database_max_connections: u32,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Checkout topic and policy.
    pub checkout: CheckoutSettings,
    /// OTLP collector endpoint; span export is disabled when unset.
    pub otlp_endpoint: Option<String>,
}

impl ApiConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| {
            AppError::Config("DATABASE_URL environment variable must be set".into())
        })?;
        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_owned())
            .parse()
            .map_err(|e| AppError::Config(format!("DATABASE_MAX_CONNECTIONS must be a valid u32: {e}")))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_owned())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        let unresolved_games = lookup("CHECKOUT_UNRESOLVED_GAMES")
            .map(|v| v.parse::<UnresolvedGamePolicy>())
            .transpose()
            .map_err(|e| AppError::Config(format!("CHECKOUT_UNRESOLVED_GAMES: {e}")))?
            .unwrap_or_default();

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            checkout: CheckoutSettings {
                topic: lookup("CHECKOUT_TOPIC").unwrap_or_else(|| DEFAULT_CHECKOUT_TOPIC.to_owned()),
                message_group: lookup("CHECKOUT_MESSAGE_GROUP")
                    .unwrap_or_else(|| DEFAULT_MESSAGE_GROUP.to_owned()),
                unresolved_games,
            },
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty()),
        })
    }

    /// Returns the address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
