//! Session repository for database operations

use sqlx::PgPool;
use tracing::info;

use super::{RepositoryError, RepositoryResult};
use crate::models::{DEFAULT_PHOTO_TYPE, NewSession, Session};

/// Session repository for database operations
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a new booth session
    ///
    /// Ids are never reused, so an existing id yields [`RepositoryError::Conflict`].
    pub async fn create(&self, new_session: &NewSession) -> RepositoryResult<Session> {
        info!("Creating session: {}", new_session.id);

        let photo_type = new_session
            .photo_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_PHOTO_TYPE);

        sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (id, email, phone, photo_type)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, phone, photo_type, email_sent, sms_sent, created_at
            "#,
        )
        .bind(&new_session.id)
        .bind(&new_session.email)
        .bind(&new_session.phone)
        .bind(photo_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepositoryError::Conflict(format!("Session {}", new_session.id))
            }
            other => RepositoryError::Database(other),
        })
    }

    /// Find a session by ID
    pub async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, email, phone, photo_type, email_sent, sms_sent, created_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Flag the email channel as delivered, keeping any recipient already on file
    ///
    /// Returns false when no session has this id.
    pub async fn mark_email_sent(&self, id: &str, email: &str) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET email_sent = TRUE, email = COALESCE(email, $2)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(email)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Flag the SMS channel as delivered, keeping any number already on file
    ///
    /// Returns false when no session has this id.
    pub async fn mark_sms_sent(&self, id: &str, phone: &str) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET sms_sent = TRUE, phone = COALESCE(phone, $2)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(phone)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
