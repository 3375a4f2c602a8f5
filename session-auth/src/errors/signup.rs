use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SignupError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("username must be between {0} and {1} characters long")]
    InvalidUsername(usize, usize),

    #[error("password must be 8 to 72 characters long and contain a lowercase letter, an uppercase letter, a digit and a special character")]
    InvalidPassword,

    #[error("User with this email already exists")]
    EmailTaken,

    #[error("User with this username already exists")]
    UsernameTaken,

    #[error("Something went wrong, please try again later.")]
    InternalServerError,
}

impl IntoResponse for SignupError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            SignupError::InvalidEmail
            | SignupError::InvalidUsername(..)
            | SignupError::InvalidPassword => StatusCode::UNPROCESSABLE_ENTITY,
            SignupError::EmailTaken | SignupError::UsernameTaken => StatusCode::CONFLICT,
            SignupError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
