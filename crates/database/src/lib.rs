//! SQLite persistence layer for the astrology chat backend.
//!
//! This crate provides async database operations for accounts, account
//! settings, profiles (with account membership), and chat messages using
//! SQLx with SQLite. Deletion of profiles and messages is always soft: a
//! flag plus timestamp, never a removed row.
//!
//! # Example
//!
//! ```no_run
//! use database::{account, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:astro.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Resolve (or create) the account for an auth subject
//!     let acct = account::get_or_create_account(db.pool(), "auth-user-1", None).await?;
//!     println!("account {}", acct.account_id);
//!
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod chat;
pub mod error;
pub mod models;
pub mod profile;
pub mod settings;

pub use error::{DatabaseError, Result};
pub use models::{Account, AccountSettings, ChatMessage, Profile};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `sqlite::memory:` for tests.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
