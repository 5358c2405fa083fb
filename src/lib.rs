//! # URL Redirector
//!
//! A URL shortener built with Axum and sqlx that stores links in Postgres,
//! MySQL-family servers or SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities and repository traits
//! - **Application Layer** ([`application`]) - Link, key and resolution services
//! - **Infrastructure Layer** ([`infrastructure`]) - Database handle, migrations, SQL repositories
//! - **API Layer** ([`api`]) - Handlers, DTOs and middleware
//!
//! ## Features
//!
//! - Random 8-character short links with collision retry
//! - Vanity links under caller-chosen names
//! - Stateless base62 links that need no storage (`/a/{code}`, `/at/{code}`)
//! - SHA-256 hashed API keys with an admin flag, sent as an `access_token` cookie
//! - Embedded, versioned schema migrations
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="file:./redirector.db"
//! export ROOT_URL="https://example.com"
//!
//! # Migrations run on startup; the first admin key is printed to the log
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{Access, KeyService, LinkService, ResolverService};
    pub use crate::domain::entities::{ApiKey, IssuedKey, ShortLink, VanityLink};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
