use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum LedgerError {
    #[error("session ledger unavailable: {0}")]
    Unavailable(String),

    #[error("delete needs exactly one of {{token}} or {{user_id, session_id}}")]
    InvalidRequestShape,

    #[error("refresh token already recorded")]
    DuplicateToken,
}
