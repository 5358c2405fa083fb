//! SQL implementation of the API key repository.

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::json;
use sqlx::Row;
use sqlx::any::AnyRow;
use std::sync::Arc;

use crate::domain::entities::{ApiKey, NewApiKey};
use crate::domain::repositories::KeyRepository;
use crate::error::AppError;
use crate::infrastructure::database::Database;

/// `admin` is read back as an integer: MySQL reports `BOOLEAN` columns as
/// `TINYINT`, which the `Any` driver cannot decode as a bool.
const KEY_COLUMNS: &str = "hashed, \
     CASE WHEN admin IS NULL THEN NULL WHEN admin THEN 1 ELSE 0 END AS admin, \
     created_at";

/// API key storage on any supported backend.
///
/// Stores SHA-256 digests only. Raw keys are never persisted.
pub struct SqlKeyRepository {
    db: Arc<Database>,
}

impl SqlKeyRepository {
    /// Creates a new repository over a database handle.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

fn map_key(row: &AnyRow) -> Result<ApiKey, AppError> {
    let hashed: String = row.try_get("hashed")?;
    let admin: Option<i64> = row.try_get("admin")?;
    let created_at: i64 = row.try_get("created_at")?;

    let created_at = DateTime::from_timestamp(created_at, 0).ok_or_else(|| {
        AppError::internal(
            "Invalid key timestamp",
            json!({ "created_at": created_at }),
        )
    })?;

    Ok(ApiKey::new(hashed, admin.map(|v| v != 0), created_at))
}

#[async_trait]
impl KeyRepository for SqlKeyRepository {
    async fn create(&self, key: NewApiKey) -> Result<ApiKey, AppError> {
        let sql = self
            .db
            .sql("INSERT INTO api_keys (hashed, admin, created_at) VALUES ($1, $2, $3)");

        let created_at = key.created_at.timestamp();

        sqlx::query(&sql)
            .bind(key.hashed.as_str())
            .bind(key.admin)
            .bind(created_at)
            .execute(self.db.pool())
            .await?;

        // Stored with second precision; return what a later read would see.
        let created_at = DateTime::from_timestamp(created_at, 0).unwrap_or(key.created_at);

        Ok(ApiKey::new(key.hashed, key.admin, created_at))
    }

    async fn find_by_digest(&self, digest: &str) -> Result<Option<ApiKey>, AppError> {
        let sql = format!("SELECT {} FROM api_keys WHERE hashed = $1", KEY_COLUMNS);
        let sql = self.db.sql(&sql);

        let row = sqlx::query(&sql)
            .bind(digest)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(map_key).transpose()
    }

    async fn has_any(&self) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT hashed FROM api_keys LIMIT 1")
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.is_some())
    }

    async fn list(&self) -> Result<Vec<ApiKey>, AppError> {
        let sql = format!(
            "SELECT {} FROM api_keys ORDER BY created_at DESC, hashed",
            KEY_COLUMNS
        );

        let rows = sqlx::query(&sql).fetch_all(self.db.pool()).await?;

        rows.iter().map(map_key).collect()
    }
}
