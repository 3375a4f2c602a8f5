use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};
use log::error;

use crate::domain::{CredentialError, CredentialVerifier};

/// Argon2id hashing. Both directions run on the blocking pool since a single
/// hash takes tens of milliseconds.
#[derive(Clone, Debug, Default)]
pub struct Argon2Verifier;

impl Argon2Verifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl CredentialVerifier for Argon2Verifier {
    async fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        let password = plaintext.to_owned();
        tokio::task::spawn_blocking(move || {
            let params =
                Params::new(15000, 2, 1, None).map_err(|_| CredentialError::HashFailed)?;
            let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|_| CredentialError::HashFailed)
        })
        .await
        .map_err(|e| {
            error!("password hashing task failed: {e}");
            CredentialError::HashFailed
        })?
    }

    async fn verify(&self, plaintext: &str, hash: &str) -> bool {
        let password = plaintext.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || match PasswordHash::new(&hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        })
        .await
        .unwrap_or_else(|e| {
            error!("password verification task failed: {e}");
            false
        })
    }
}
