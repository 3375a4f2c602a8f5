use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScope {
    Access,
    Refresh,
}

/// Flat claim set shared by every token kind.
///
/// - access:  `sub`, `session_id`, `scope = "access"`, `jti`, `iat`, `exp`
/// - refresh: `sub`, `scope = "refresh"`, `jti`, `iat`, `exp`
/// - email:   `sub`, `jti`, `iat`, `exp`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<TokenScope>,
    // Random per token; keeps two tokens minted in the same second distinct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn access(sub: &str, session_id: &str, jti: String, iat: i64, exp: i64) -> Self {
        Self {
            sub: sub.to_owned(),
            session_id: Some(session_id.to_owned()),
            scope: Some(TokenScope::Access),
            jti: Some(jti),
            iat,
            exp,
        }
    }

    pub fn refresh(sub: &str, jti: String, iat: i64, exp: i64) -> Self {
        Self {
            sub: sub.to_owned(),
            session_id: None,
            scope: Some(TokenScope::Refresh),
            jti: Some(jti),
            iat,
            exp,
        }
    }

    pub fn email(sub: &str, jti: String, iat: i64, exp: i64) -> Self {
        Self {
            sub: sub.to_owned(),
            session_id: None,
            scope: None,
            jti: Some(jti),
            iat,
            exp,
        }
    }
}
