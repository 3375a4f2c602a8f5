use chrono::DateTime;
use welds::prelude::*;

use crate::domain::RefreshTokenRecord;

#[derive(Debug, Default, WeldsModel)]
#[welds(table = "refresh_tokens")]
pub struct RefreshTokenModel {
    #[welds(primary_key)]
    pub id: i64,
    pub token: String,
    pub user_id: i64,
    pub session_id: String,
    /// Unix seconds.
    pub expires_at: i64,
}

impl From<&RefreshTokenModel> for RefreshTokenRecord {
    fn from(model: &RefreshTokenModel) -> Self {
        RefreshTokenRecord {
            token: model.token.clone(),
            user_id: model.user_id,
            session_id: model.session_id.clone(),
            // out-of-range timestamps read as the epoch, i.e. long expired
            expires_at: DateTime::from_timestamp(model.expires_at, 0).unwrap_or_default(),
        }
    }
}
