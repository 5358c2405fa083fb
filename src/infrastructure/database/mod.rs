//! Connection handling for the supported SQL backends.
//!
//! All repositories talk to the store through sqlx's `Any` driver, so the same
//! query text runs against Postgres, MySQL-family servers and SQLite. Queries
//! are written with Postgres-style `$N` placeholders and rewritten by
//! [`Database::sql`] for backends that expect `?`.

pub mod migrator;

use anyhow::{Context, Result};
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;
use std::borrow::Cow;
use std::time::Duration;

use crate::config::{DatabaseConfig, DatabaseKind, PoolSettings};

pub use migrator::{EmbeddedMigrations, Migration, MigrationError, MigrationSource, Migrator};

/// A connection pool tagged with the backend it points at.
#[derive(Debug, Clone)]
pub struct Database {
    pool: AnyPool,
    kind: DatabaseKind,
}

impl Database {
    /// Opens a connection pool for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the DSN cannot be normalized or the first connection fails.
    pub async fn connect(config: &DatabaseConfig, settings: &PoolSettings) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let url = config.connection_url()?;

        let pool = AnyPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.connect_timeout))
            .idle_timeout(non_zero_secs(settings.idle_timeout))
            .max_lifetime(non_zero_secs(settings.max_lifetime))
            .connect(&url)
            .await
            .with_context(|| format!("Failed to connect to {} database", config.kind))?;

        Ok(Self::from_pool(pool, config.kind))
    }

    /// Wraps an existing pool.
    pub fn from_pool(pool: AnyPool, kind: DatabaseKind) -> Self {
        Self { pool, kind }
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    /// Adapts `$N` placeholders to the backend's syntax.
    ///
    /// Postgres keeps `$N`. MySQL and SQLite get positional `?`, so every
    /// placeholder must appear exactly once and in ascending order.
    pub fn sql<'q>(&self, query: &'q str) -> Cow<'q, str> {
        match self.kind {
            DatabaseKind::Postgres => Cow::Borrowed(query),
            DatabaseKind::Sqlite | DatabaseKind::MySql => Cow::Owned(positional_placeholders(query)),
        }
    }

    /// Round-trips a trivial query.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn non_zero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn positional_placeholders(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    let mut chars = query.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek().is_some_and(|n| n.is_ascii_digit()) {
            while chars.peek().is_some_and(|n| n.is_ascii_digit()) {
                chars.next();
            }
            out.push('?');
        } else {
            out.push(c);
        }
    }

    out
}
