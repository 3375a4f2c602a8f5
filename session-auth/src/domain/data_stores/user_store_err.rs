use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum UserStoreError {
    #[error("user with this email already exists")]
    EmailTaken,
    #[error("user with this username already exists")]
    UsernameTaken,
    #[error("user not found")]
    UserNotFound,
    #[error("user store failure: {0}")]
    Unexpected(String),
}
