//! SQL implementation of the short link repository.

use async_trait::async_trait;
use sqlx::Row;
use sqlx::any::AnyRow;
use std::sync::Arc;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::infrastructure::database::Database;

/// Short link storage on any supported backend.
pub struct SqlShortLinkRepository {
    db: Arc<Database>,
}

impl SqlShortLinkRepository {
    /// Creates a new repository over a database handle.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

fn map_short_link(row: &AnyRow) -> Result<ShortLink, sqlx::Error> {
    Ok(ShortLink::new(row.try_get("id")?, row.try_get("url")?))
}

#[async_trait]
impl ShortLinkRepository for SqlShortLinkRepository {
    async fn create(&self, link: ShortLink) -> Result<ShortLink, AppError> {
        let sql = self
            .db
            .sql("INSERT INTO short_links (id, url) VALUES ($1, $2)");

        sqlx::query(&sql)
            .bind(link.id.as_str())
            .bind(link.url.as_str())
            .execute(self.db.pool())
            .await?;

        Ok(link)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ShortLink>, AppError> {
        let sql = self.db.sql("SELECT id, url FROM short_links WHERE id = $1");

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        // MySQL's default collation matches case-insensitively.
        let link = row.as_ref().map(map_short_link).transpose()?;
        Ok(link.filter(|link| link.id == id))
    }
}
