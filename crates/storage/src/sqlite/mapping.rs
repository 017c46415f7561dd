use chrono::{DateTime, Utc};
use sqlx::Row;
use vocab_core::model::{AuthToken, SessionContext, UserId, UserProfile};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn map_session_row(row: &sqlx::sqlite::SqliteRow) -> Result<SessionContext, StorageError> {
    let token: String = row.try_get("token").map_err(ser)?;
    let user_id: String = row.try_get("user_id").map_err(ser)?;
    let email: String = row.try_get("email").map_err(ser)?;
    let username: String = row.try_get("username").map_err(ser)?;
    let signed_in_at: DateTime<Utc> = row.try_get("signed_in_at").map_err(ser)?;

    let id: UserId = user_id.parse().map_err(ser)?;
    Ok(SessionContext::new(
        AuthToken::new(token),
        UserProfile {
            id,
            email,
            username,
        },
        signed_in_at,
    ))
}
