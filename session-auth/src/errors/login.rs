use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

use super::AuthError;

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl IntoResponse for LoginError {
    fn into_response(self) -> axum::response::Response {
        match self {
            LoginError::InvalidEmail => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()).into_response()
            }
            LoginError::Auth(e) => e.into_response(),
        }
    }
}
