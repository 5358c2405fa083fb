//! Versioned schema migrations.
//!
//! Migration scripts live in `migrations/` and are compiled into the binary.
//! File names follow `<version>_<description>.up.sql` with an optional
//! `<version>_<description>.down.sql` sibling:
//!
//! ```text
//! migrations/
//!   0001_create_short_links.up.sql
//!   0001_create_short_links.down.sql
//!   0002_create_vanity_links.up.sql
//! ```
//!
//! Versions are compared as strings, so they must be zero-padded. Applied
//! versions are tracked in a `migrations` table that the [`Migrator`] creates on
//! first use. Each file runs in its own transaction together with the insert
//! that records it, so a file is either fully applied and recorded or not
//! recorded at all (on backends with transactional DDL).

use rust_embed::Embed;
use sqlx::Row;
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::Database;

const CREATE_MIGRATIONS_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS migrations (version VARCHAR(255) PRIMARY KEY)";

/// Errors raised while discovering, applying or rolling back migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to read migration {filename}: {reason}")]
    Source { filename: String, reason: String },

    #[error("duplicate migration version {version} ({first} and {second})")]
    DuplicateVersion {
        version: String,
        first: String,
        second: String,
    },

    #[error("failed to ensure migrations table: {0}")]
    Bookkeeping(#[source] sqlx::Error),

    #[error("failed to fetch applied migrations: {0}")]
    AppliedSet(#[source] sqlx::Error),

    #[error("failed to execute statement in {filename}: {source}")]
    Statement {
        filename: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to record migration {version}: {source}")]
    Record {
        version: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("no down migration found for version {version}")]
    MissingDown { version: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A single migration script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub version: String,
    pub description: String,
    pub direction: Direction,
    pub filename: String,
    pub sql: String,
}

impl Migration {
    /// Parses a migration from its file name.
    ///
    /// Returns `None` for anything that is not a top-level
    /// `<version>_<description>.up.sql` or `.down.sql` file.
    pub fn parse(filename: &str, sql: impl Into<String>) -> Option<Self> {
        if filename.contains('/') || filename.contains('\\') {
            return None;
        }

        let (stem, direction) = if let Some(stem) = filename.strip_suffix(".up.sql") {
            (stem, Direction::Up)
        } else if let Some(stem) = filename.strip_suffix(".down.sql") {
            (stem, Direction::Down)
        } else {
            return None;
        };

        let (version, description) = stem.split_once('_')?;
        if version.is_empty() || description.is_empty() {
            return None;
        }

        Some(Self {
            version: version.to_string(),
            description: description.to_string(),
            direction,
            filename: filename.to_string(),
            sql: sql.into(),
        })
    }

    /// Individual statements of the script, split on `;`, blanks skipped.
    pub fn statements(&self) -> impl Iterator<Item = &str> {
        self.sql.split(';').map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Supplies the set of known migration scripts.
pub trait MigrationSource {
    /// Returns every parseable migration; unrelated files are skipped.
    fn migrations(&self) -> Result<Vec<Migration>, MigrationError>;
}

/// Scripts embedded from the crate's `migrations/` directory.
#[derive(Embed)]
#[folder = "migrations/"]
pub struct EmbeddedMigrations;

impl MigrationSource for EmbeddedMigrations {
    fn migrations(&self) -> Result<Vec<Migration>, MigrationError> {
        let mut migrations = Vec::new();

        for name in Self::iter() {
            let Some(file) = Self::get(&name) else {
                continue;
            };
            let sql = String::from_utf8(file.data.into_owned()).map_err(|e| {
                MigrationError::Source {
                    filename: name.to_string(),
                    reason: e.to_string(),
                }
            })?;

            match Migration::parse(&name, sql) {
                Some(migration) => migrations.push(migration),
                None => debug!(file = %name, "Skipping non-migration file"),
            }
        }

        Ok(migrations)
    }
}

/// In-memory scripts as `(filename, sql)` pairs.
impl MigrationSource for [(&str, &str)] {
    fn migrations(&self) -> Result<Vec<Migration>, MigrationError> {
        Ok(self
            .iter()
            .filter_map(|(name, sql)| Migration::parse(name, *sql))
            .collect())
    }
}

/// Applied state of one `up` migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub version: String,
    pub description: String,
    pub applied: bool,
}

/// Applies and rolls back migrations against a [`Database`].
pub struct Migrator<'a> {
    db: &'a Database,
}

impl<'a> Migrator<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Applies every pending `up` migration in ascending version order.
    ///
    /// Returns the versions applied by this call; an empty list means the
    /// schema was already current.
    ///
    /// A migration that fails but is found recorded afterwards was applied by
    /// a concurrent process and counts as done.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::Statement`] naming the failing file; nothing
    /// after it is applied.
    pub async fn apply_all<S>(&self, source: &S) -> Result<Vec<String>, MigrationError>
    where
        S: MigrationSource + ?Sized,
    {
        let migrations = pending_order(source.migrations()?, Direction::Up)?;

        self.ensure_migrations_table().await?;
        let applied = self.applied_versions().await?;

        let mut newly_applied = Vec::new();
        for migration in migrations
            .iter()
            .filter(|m| !applied.contains(&m.version))
        {
            info!(migration = %migration.filename, "Applying migration");

            if let Err(err) = self.apply_one(migration).await {
                if self.is_recorded(&migration.version).await {
                    warn!(
                        migration = %migration.filename,
                        "Migration was applied concurrently by another process"
                    );
                    continue;
                }
                return Err(err);
            }

            newly_applied.push(migration.version.clone());
        }

        if newly_applied.is_empty() {
            debug!("Schema is up to date");
        } else {
            info!(count = newly_applied.len(), "Migrations applied");
        }

        Ok(newly_applied)
    }

    /// Reverts the most recently applied migration using its `.down.sql` script.
    ///
    /// Returns the reverted version, or `None` when nothing is applied. This is
    /// an operator action; the server never calls it.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::MissingDown`] if the version has no down script.
    pub async fn rollback_last<S>(&self, source: &S) -> Result<Option<String>, MigrationError>
    where
        S: MigrationSource + ?Sized,
    {
        self.ensure_migrations_table().await?;

        let Some(version) = self.applied_versions().await?.into_iter().next_back() else {
            return Ok(None);
        };

        let down = pending_order(source.migrations()?, Direction::Down)?
            .into_iter()
            .find(|m| m.version == version)
            .ok_or_else(|| MigrationError::MissingDown {
                version: version.clone(),
            })?;

        info!(migration = %down.filename, "Rolling back migration");

        let statement_error = |source: sqlx::Error| MigrationError::Statement {
            filename: down.filename.clone(),
            source,
        };

        let mut tx = self.db.pool().begin().await.map_err(statement_error)?;

        for stmt in down.statements() {
            sqlx::query(stmt)
                .execute(&mut *tx)
                .await
                .map_err(statement_error)?;
        }

        let delete = self.db.sql("DELETE FROM migrations WHERE version = $1");
        sqlx::query(&delete)
            .bind(version.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|source| MigrationError::Record {
                version: version.clone(),
                source,
            })?;

        tx.commit().await.map_err(|source| MigrationError::Record {
            version: version.clone(),
            source,
        })?;

        Ok(Some(version))
    }

    /// Lists every `up` migration with its applied flag, in version order.
    pub async fn status<S>(&self, source: &S) -> Result<Vec<MigrationStatus>, MigrationError>
    where
        S: MigrationSource + ?Sized,
    {
        let migrations = pending_order(source.migrations()?, Direction::Up)?;

        self.ensure_migrations_table().await?;
        let applied = self.applied_versions().await?;

        Ok(migrations
            .into_iter()
            .map(|m| MigrationStatus {
                applied: applied.contains(&m.version),
                version: m.version,
                description: m.description,
            })
            .collect())
    }

    /// Versions currently recorded in the bookkeeping table.
    pub async fn applied_versions(&self) -> Result<BTreeSet<String>, MigrationError> {
        let rows = sqlx::query("SELECT version FROM migrations")
            .fetch_all(self.db.pool())
            .await
            .map_err(MigrationError::AppliedSet)?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("version"))
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(MigrationError::AppliedSet)
    }

    async fn ensure_migrations_table(&self) -> Result<(), MigrationError> {
        if let Err(e) = sqlx::query(CREATE_MIGRATIONS_TABLE)
            .execute(self.db.pool())
            .await
        {
            // Postgres can reject concurrent CREATE TABLE IF NOT EXISTS.
            if self.applied_versions().await.is_ok() {
                warn!(error = %e, "Migrations table was created concurrently");
                return Ok(());
            }
            return Err(MigrationError::Bookkeeping(e));
        }

        Ok(())
    }

    async fn apply_one(&self, migration: &Migration) -> Result<(), MigrationError> {
        let statement_error = |source: sqlx::Error| MigrationError::Statement {
            filename: migration.filename.clone(),
            source,
        };

        let mut tx = self.db.pool().begin().await.map_err(statement_error)?;

        for stmt in migration.statements() {
            sqlx::query(stmt)
                .execute(&mut *tx)
                .await
                .map_err(statement_error)?;
        }

        let record_error = |source: sqlx::Error| MigrationError::Record {
            version: migration.version.clone(),
            source,
        };

        let insert = self.db.sql("INSERT INTO migrations (version) VALUES ($1)");
        sqlx::query(&insert)
            .bind(migration.version.as_str())
            .execute(&mut *tx)
            .await
            .map_err(record_error)?;

        tx.commit().await.map_err(record_error)
    }

    async fn is_recorded(&self, version: &str) -> bool {
        self.applied_versions()
            .await
            .map(|applied| applied.contains(version))
            .unwrap_or(false)
    }
}

/// Keeps one direction and sorts it by version, rejecting duplicate versions.
fn pending_order(
    migrations: Vec<Migration>,
    direction: Direction,
) -> Result<Vec<Migration>, MigrationError> {
    let mut selected: Vec<Migration> = migrations
        .into_iter()
        .filter(|m| m.direction == direction)
        .collect();
    selected.sort_by(|a, b| a.version.cmp(&b.version));

    let mut seen = HashSet::new();
    for (i, m) in selected.iter().enumerate() {
        if !seen.insert(m.version.as_str()) {
            return Err(MigrationError::DuplicateVersion {
                version: m.version.clone(),
                first: selected[i - 1].filename.clone(),
                second: m.filename.clone(),
            });
        }
    }

    Ok(selected)
}
