use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CredentialError {
    #[error("password hashing failed")]
    HashFailed,
}

/// Password hashing capability. `verify` answers `false` for a mismatch or an
/// unparseable hash; it never errors.
#[async_trait::async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn hash(&self, plaintext: &str) -> Result<String, CredentialError>;
    async fn verify(&self, plaintext: &str, hash: &str) -> bool;
}
