use serde::{Deserialize, Serialize};

use crate::utils::consts::TOKEN_TYPE_BEARER;

/// Access/refresh pair handed back by login and refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

impl IssuedTokens {
    pub fn bearer(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE_BEARER.to_owned(),
        }
    }
}
