use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::domain::LedgerError;

/// Failures surfaced by the token service. Display text is safe to return to
/// clients; underlying causes are only logged.
#[derive(Error, Debug, PartialEq)]
pub enum AuthError {
    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Not authenticated.")]
    Unauthorized,

    #[error("Invalid token.")]
    InvalidToken,

    #[error("Token scope is not valid for this operation.")]
    InvalidScope,

    #[error("Session not found.")]
    SessionNotFound,

    #[error("Too many active sessions, log out on another device first.")]
    TooManySessions,

    #[error("Invalid or expired email token.")]
    InvalidEmailToken,

    #[error("Session store unavailable, please try again later.")]
    LedgerUnavailable,

    #[error("Invalid request shape.")]
    InvalidRequestShape,

    #[error("Identity cache unavailable, please try again later.")]
    CacheUnavailable,

    #[error("User store unavailable, please try again later.")]
    UserStoreUnavailable,

    #[error("Something went wrong, please try again later.")]
    Internal,
}

impl From<LedgerError> for AuthError {
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::Unavailable(_) => AuthError::LedgerUnavailable,
            LedgerError::InvalidRequestShape => AuthError::InvalidRequestShape,
            LedgerError::DuplicateToken => AuthError::Internal,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            AuthError::InvalidCredentials
            | AuthError::Unauthorized
            | AuthError::InvalidToken
            | AuthError::InvalidScope
            | AuthError::SessionNotFound => StatusCode::UNAUTHORIZED,
            AuthError::TooManySessions => StatusCode::TOO_MANY_REQUESTS,
            AuthError::InvalidEmailToken | AuthError::InvalidRequestShape => {
                StatusCode::BAD_REQUEST
            }
            AuthError::LedgerUnavailable
            | AuthError::CacheUnavailable
            | AuthError::UserStoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
