use async_trait::async_trait;
use vocab_core::model::SessionContext;

use crate::repository::{SessionRepository, StorageError};

use super::SqliteRepository;
use super::mapping::map_session_row;

#[async_trait]
impl SessionRepository for SqliteRepository {
    async fn load_session(&self) -> Result<Option<SessionContext>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT token, user_id, email, username, signed_in_at
            FROM auth_session
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        row.as_ref().map(map_session_row).transpose()
    }

    async fn save_session(&self, session: &SessionContext) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO auth_session (id, token, user_id, email, username, signed_in_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                token = excluded.token,
                user_id = excluded.user_id,
                email = excluded.email,
                username = excluded.username,
                signed_in_at = excluded.signed_in_at
            ",
        )
        .bind(1_i64)
        .bind(session.token().as_str())
        .bind(session.user().id.to_string())
        .bind(&session.user().email)
        .bind(&session.user().username)
        .bind(session.signed_in_at())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM auth_session WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
