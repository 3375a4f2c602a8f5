use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CacheError {
    #[error("identity cache unavailable: {0}")]
    Unavailable(String),
}
