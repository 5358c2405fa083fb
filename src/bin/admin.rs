//! CLI administration tool for url-redirector.
//!
//! Manages API keys and the database schema without going through the HTTP
//! API, and encodes or decodes stateless links.
//!
//! # Usage
//!
//! ```bash
//! # Issue an admin key
//! cargo run --bin admin -- key create --admin
//!
//! # List all keys
//! cargo run --bin admin -- key list
//!
//! # Apply pending migrations / show their state
//! cargo run --bin admin -- db migrate
//! cargo run --bin admin -- db status
//!
//! # Undo the most recent migration
//! cargo run --bin admin -- db rollback
//!
//! # Build a stateless link
//! cargo run --bin admin -- encode example.com/docs
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: connection string (default: `file:./redirector.db`)
//! - `DATABASE_KIND`: `postgres`, `sqlite` or `mysql` (inferred when unset)

use url_redirector::application::services::KeyService;
use url_redirector::config::{DEFAULT_DATABASE_URL, DatabaseConfig, PoolSettings, mask_connection_string};
use url_redirector::infrastructure::database::{Database, EmbeddedMigrations, Migrator};
use url_redirector::infrastructure::persistence::SqlKeyRepository;
use url_redirector::utils::base62;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing url-redirector.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage API keys
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Print the stateless link code for a URL (without scheme)
    Encode { url: String },

    /// Print the URL a stateless link code stands for
    Decode { code: String },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Issue a new API key
    Create {
        /// Grant admin rights
        #[arg(long)]
        admin: bool,
    },

    /// List all keys
    List,

    /// Show one key by its hex digest
    Show { digest: String },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,

    /// Show applied and pending migrations
    Status,

    /// Revert the most recently applied migration
    Rollback {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { url } => println!("{}", base62::encode(&url)),
        Commands::Decode { code } => {
            let url = base62::decode(&code).context("Invalid code")?;
            println!("{url}");
        }
        Commands::Key { action } => handle_key_action(action, connect().await?).await?,
        Commands::Db { action } => {
            let db = connect().await?;
            handle_db_action(action, &db).await?
        }
    }

    Ok(())
}

async fn connect() -> Result<Arc<Database>> {
    let dsn = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let kind = std::env::var("DATABASE_KIND").ok();
    let config = DatabaseConfig::resolve(kind.as_deref(), dsn)?;

    let settings = PoolSettings {
        max_connections: 1,
        ..PoolSettings::default()
    };

    let db = Database::connect(&config, &settings)
        .await
        .with_context(|| format!("Failed to connect to {}", mask_connection_string(&config.dsn)))?;

    Ok(Arc::new(db))
}

async fn handle_key_action(action: KeyAction, db: Arc<Database>) -> Result<()> {
    let service = KeyService::new(Arc::new(SqlKeyRepository::new(db)));

    match action {
        KeyAction::Create { admin } => create_key(&service, admin).await,
        KeyAction::List => list_keys(&service).await,
        KeyAction::Show { digest } => show_key(&service, &digest).await,
    }
}

/// Issues a key and prints its plaintext once.
///
/// Only the SHA-256 digest is stored; the plaintext cannot be shown again.
async fn create_key(service: &KeyService<SqlKeyRepository>, admin: bool) -> Result<()> {
    println!("{}", "🔑 Create API Key".bright_blue().bold());
    println!();

    let issued = service
        .create_key(Some(admin))
        .await
        .context("Failed to create key (has `admin db migrate` been run?)")?;

    println!("{}", "✅ Key created successfully!".green().bold());
    println!();
    println!("  Key:    {}", issued.plaintext.bright_yellow().bold());
    println!("  Digest: {}", issued.record.hashed.bright_black());
    println!(
        "  Admin:  {}",
        if admin { "yes".green() } else { "no".normal() }
    );
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this key now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -b \"access_token={}\" -d '{{\"url\":\"https://example.org\"}}' -H 'Content-Type: application/json' http://localhost:8080/add",
        issued.plaintext.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists key digests, newest first.
///
/// # Output Format
///
/// ```text
/// 📋 API Keys
///
///   Digest                                                            Created           Admin
///   ─────────────────────────────────────────────────────────────────────────────────────────
///   9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08  2025-01-15 10:30  yes
/// ```
async fn list_keys(service: &KeyService<SqlKeyRepository>) -> Result<()> {
    println!("{}", "📋 API Keys".bright_blue().bold());
    println!();

    let keys = service.list_keys().await.context("Failed to list keys")?;

    if keys.is_empty() {
        println!("{}", "  No keys found".yellow());
        println!();
        println!(
            "  Create one with: {} admin key create --admin",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<64}  {:<16}  {}",
        "Digest".bright_white().bold(),
        "Created".bright_white().bold(),
        "Admin".bright_white().bold()
    );
    println!("  {}", "─".repeat(89).bright_black());

    for key in &keys {
        let admin = if key.is_admin() {
            "yes".green()
        } else {
            "no".normal()
        };

        println!(
            "  {:<64}  {:<16}  {}",
            key.hashed.cyan(),
            key.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            admin
        );
    }

    println!();
    println!("  Total: {}", keys.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn show_key(service: &KeyService<SqlKeyRepository>, digest: &str) -> Result<()> {
    let key = service
        .find_key_by_digest(digest)
        .await
        .context("Key lookup failed")?;

    println!("  Digest:  {}", key.hashed.cyan());
    println!(
        "  Admin:   {}",
        match key.admin {
            Some(true) => "yes".green(),
            Some(false) => "no".normal(),
            None => "unset".bright_black(),
        }
    );
    println!("  Created: {}", key.created_at.format("%Y-%m-%d %H:%M:%S UTC"));

    Ok(())
}

async fn handle_db_action(action: DbAction, db: &Database) -> Result<()> {
    match action {
        DbAction::Check => check_db(db).await,
        DbAction::Migrate => migrate(db).await,
        DbAction::Status => status(db).await,
        DbAction::Rollback { yes } => rollback(db, yes).await,
    }
}

async fn check_db(db: &Database) -> Result<()> {
    println!("{}", "🔍 Checking database connection...".bright_blue());

    db.ping().await.context("Database did not answer")?;

    println!(
        "{} ({})",
        "✅ Database connection OK".green().bold(),
        db.kind()
    );

    Ok(())
}

async fn migrate(db: &Database) -> Result<()> {
    println!("{}", "🗄️  Applying migrations".bright_blue().bold());
    println!();

    let applied = Migrator::new(db).apply_all(&EmbeddedMigrations).await?;

    if applied.is_empty() {
        println!("{}", "  Schema is up to date".green());
    } else {
        for version in &applied {
            println!("  {} {}", "applied".green(), version.cyan());
        }
    }
    println!();

    Ok(())
}

async fn status(db: &Database) -> Result<()> {
    println!("{}", "🗄️  Migration status".bright_blue().bold());
    println!();

    for migration in Migrator::new(db).status(&EmbeddedMigrations).await? {
        let state = if migration.applied {
            "applied".green()
        } else {
            "pending".yellow()
        };

        println!(
            "  {:<8} {:<6} {}",
            state,
            migration.version.cyan(),
            migration.description
        );
    }
    println!();

    Ok(())
}

/// Reverts the last applied migration after confirmation.
///
/// Runs the matching `.down.sql` script. Data in dropped tables is lost.
async fn rollback(db: &Database, skip_confirm: bool) -> Result<()> {
    println!("{}", "⏪ Roll back last migration".bright_blue().bold());
    println!();

    let migrator = Migrator::new(db);

    let Some(last) = migrator.applied_versions().await?.into_iter().next_back() else {
        println!("{}", "  No applied migrations".yellow());
        return Ok(());
    };

    println!("  Version: {}", last.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Roll back this migration? Its data will be lost")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    if let Some(version) = migrator.rollback_last(&EmbeddedMigrations).await? {
        println!();
        println!(
            "{} {}",
            "✅ Rolled back".green().bold(),
            version.cyan()
        );
    }

    Ok(())
}
