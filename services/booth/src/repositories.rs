//! Repositories for database operations

use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

pub mod session;
pub mod settings;

pub use session::SessionRepository;
pub use settings::SettingsRepository;

/// Error type shared by the repositories
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A row with the same identity already exists
    #[error("{0} already exists")]
    Conflict(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Type alias for repository results
pub type RepositoryResult<T> = Result<T, RepositoryError>;

const CREATE_SESSIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS sessions (
        id VARCHAR(20) PRIMARY KEY,
        email VARCHAR(255),
        phone VARCHAR(20),
        photo_type VARCHAR(10) NOT NULL DEFAULT 'bw',
        email_sent BOOLEAN NOT NULL DEFAULT FALSE,
        sms_sent BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ DEFAULT NOW()
    )
"#;

const CREATE_SETTINGS: &str = r#"
    CREATE TABLE IF NOT EXISTS settings (
        id SERIAL PRIMARY KEY,
        key VARCHAR(100) NOT NULL UNIQUE,
        value TEXT,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

/// Create the booth tables when they do not exist yet
pub async fn ensure_schema(pool: &PgPool) -> DatabaseResult<()> {
    for statement in [CREATE_SESSIONS, CREATE_SETTINGS] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    }

    info!("Database schema is ready");
    Ok(())
}
