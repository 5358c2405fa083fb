//! SQL implementation of the vanity link repository.

use async_trait::async_trait;
use sqlx::Row;
use std::sync::Arc;

use crate::domain::entities::VanityLink;
use crate::domain::repositories::VanityLinkRepository;
use crate::error::AppError;
use crate::infrastructure::database::Database;

/// Vanity link storage on any supported backend.
pub struct SqlVanityLinkRepository {
    db: Arc<Database>,
}

impl SqlVanityLinkRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VanityLinkRepository for SqlVanityLinkRepository {
    async fn create(&self, link: VanityLink) -> Result<VanityLink, AppError> {
        let sql = self
            .db
            .sql("INSERT INTO vanity_links (name, url) VALUES ($1, $2)");

        sqlx::query(&sql)
            .bind(link.name.as_str())
            .bind(link.url.as_str())
            .execute(self.db.pool())
            .await?;

        Ok(link)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<VanityLink>, AppError> {
        let sql = self
            .db
            .sql("SELECT name, url FROM vanity_links WHERE name = $1");

        let row = sqlx::query(&sql)
            .bind(name)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(r) => {
                let link = VanityLink::new(r.try_get("name")?, r.try_get("url")?);
                // Case-insensitive collations can return a differently cased name.
                Ok((link.name == name).then_some(link))
            }
            None => Ok(None),
        }
    }
}
