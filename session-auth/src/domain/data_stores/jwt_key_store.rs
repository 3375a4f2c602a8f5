use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Validation};

use crate::utils::Config;

/// HMAC key material for every token the service signs.
#[derive(Clone)]
pub struct JwtKeyStore {
    algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeyStore {
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.jwt_secret().as_bytes(), config.jwt_algorithm())
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }

    /// Signature + `exp` validation with zero leeway: the deny-list entry for
    /// a revoked token lapses exactly at `exp`, so nothing may be accepted
    /// past it.
    pub fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}
