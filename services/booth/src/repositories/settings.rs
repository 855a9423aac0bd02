//! Settings repository for database operations

use sqlx::PgPool;
use tracing::info;

use super::RepositoryResult;
use crate::models::Setting;

/// Key/value settings repository
#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Create a new settings repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the value stored under `key`, or `default` when the key was never set
    ///
    /// A key that exists with a null value returns `None`, not `default`.
    pub async fn get(&self, key: &str, default: Option<&str>) -> RepositoryResult<Option<String>> {
        let value: Option<Option<String>> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(match value {
            Some(value) => value,
            None => default.map(str::to_string),
        })
    }

    /// Create or overwrite the setting stored under `key`
    ///
    /// Runs as a single transaction; concurrent writers to the same key
    /// serialize on the unique constraint and the last commit wins.
    pub async fn set(&self, key: &str, value: Option<&str>) -> RepositoryResult<Setting> {
        info!("Updating setting: {}", key);

        let mut tx = self.pool.begin().await?;

        let setting = sqlx::query_as::<_, Setting>(
            r#"
            INSERT INTO settings (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET
            value = EXCLUDED.value,
            updated_at = NOW()
            RETURNING id, key, value, updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(setting)
    }

    /// All settings ordered by key
    pub async fn list(&self) -> RepositoryResult<Vec<Setting>> {
        let settings = sqlx::query_as::<_, Setting>(
            r#"
            SELECT id, key, value, updated_at
            FROM settings
            ORDER BY key
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(settings)
    }
}
