use welds::errors::Result;
use welds::migrations::prelude::*;

pub(super) fn step(_state: &TableState) -> Result<MigrationStep> {
    let m = create_table("refresh_tokens")
        .id(|c| c("id", Type::IntBig))
        .column(|c| c("token", Type::String).create_unique_index())
        .column(|c| c("user_id", Type::IntBig))
        .column(|c| c("session_id", Type::String))
        .column(|c| c("expires_at", Type::IntBig));
    Ok(MigrationStep::new("create_table_refresh_tokens", m))
}
