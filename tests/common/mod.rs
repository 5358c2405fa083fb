#![allow(dead_code)]

use axum_test::TestServer;
use sqlx::any::AnyPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use url_redirector::config::DatabaseKind;
use url_redirector::infrastructure::database::{Database, EmbeddedMigrations, Migrator};
use url_redirector::routes::app_router;
use url_redirector::state::AppState;

pub const ROOT_URL: &str = "https://root.example.org";

/// A private in-memory SQLite database with no tables.
///
/// The pool keeps its single connection open forever; closing it would drop
/// the database.
pub async fn empty_database() -> Database {
    sqlx::any::install_default_drivers();

    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    Database::from_pool(pool, DatabaseKind::Sqlite)
}

/// An in-memory SQLite database with the embedded schema applied.
pub async fn test_database() -> Arc<Database> {
    let db = empty_database().await;

    Migrator::new(&db)
        .apply_all(&EmbeddedMigrations)
        .await
        .unwrap();

    Arc::new(db)
}

pub async fn create_test_state() -> AppState {
    AppState::new(test_database().await, ROOT_URL.to_string())
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state, Duration::from_secs(5))).unwrap()
}

/// Issues a key directly through the service and returns its plaintext.
pub async fn issue_key(state: &AppState, admin: Option<bool>) -> String {
    state.key_service.create_key(admin).await.unwrap().plaintext
}

pub fn access_cookie(key: &str) -> String {
    format!("access_token={key}")
}

pub async fn table_exists(db: &Database, table: &str) -> bool {
    let sql = format!("SELECT 1 FROM {table} LIMIT 1");
    sqlx::query(&sql).fetch_optional(db.pool()).await.is_ok()
}
