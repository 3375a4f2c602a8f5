use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum EmailFlowError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("Invalid or expired email token.")]
    InvalidEmailToken,

    #[error("This link has already been used.")]
    TokenAlreadyUsed,

    #[error("User not found.")]
    UserNotFound,

    #[error("Passwords do not match.")]
    PasswordsDoNotMatch,

    #[error("password must be 8 to 72 characters long and contain a lowercase letter, an uppercase letter, a digit and a special character")]
    InvalidPassword,

    #[error("Service unavailable, please try again later.")]
    Unavailable,
}

impl IntoResponse for EmailFlowError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            EmailFlowError::InvalidEmailToken | EmailFlowError::TokenAlreadyUsed => {
                StatusCode::BAD_REQUEST
            }
            EmailFlowError::UserNotFound => StatusCode::NOT_FOUND,
            EmailFlowError::InvalidEmail
            | EmailFlowError::PasswordsDoNotMatch
            | EmailFlowError::InvalidPassword => StatusCode::UNPROCESSABLE_ENTITY,
            EmailFlowError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status, self.to_string()).into_response()
    }
}
