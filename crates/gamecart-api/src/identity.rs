//! Caller identity.
//!
//! Token validation happens at the gateway, which forwards the authenticated
//! subject in `x-user-id` and its role in `x-user-role`. Cart routes accept
//! only the `Player` role.

use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use gamecart_core::user::Role;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ErrorBody;

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the authenticated user's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// An authenticated caller holding the `Player` role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedPlayer {
    /// The caller's user id.
    pub user_id: Uuid,
}

/// Why a request was refused before reaching a handler.
#[derive(Debug, Error)]
pub enum IdentityRejection {
    #[error("missing or malformed {USER_ID_HEADER} header")]
    Unauthenticated,

    #[error("role {0:?} may not use the cart")]
    Forbidden(String),
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthenticated"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
        };
        ErrorBody::respond(status, code, self.to_string())
    }
}

impl<S> FromRequestParts<S> for AuthenticatedPlayer
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .ok_or(IdentityRejection::Unauthenticated)?;

        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .trim();

        if Role::parse(role) != Some(Role::Player) {
            return Err(IdentityRejection::Forbidden(role.to_owned()));
        }

        Ok(Self { user_id })
    }
}
