// Persistence layer for user credentials.
// Exposes the UserStore contract plus a PostgreSQL and an in-memory backend.

pub mod config;
pub mod error;
pub mod memory;
pub mod repositories;
pub mod store;

pub use config::DatabaseConfig;
pub use error::StoreError;
pub use memory::InMemoryUserStore;
pub use repositories::PgUserStore;
pub use store::UserStore;

pub use sqlx;

use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};

/// Database connection manager
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database instance from configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        tracing::info!(
            "Connecting to database at {}",
            config.database_url.split('@').last().unwrap_or("hidden")
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .connect(&config.database_url)
            .await
            .context("Failed to connect to database")?;

        tracing::info!(
            max_connections = config.max_connections,
            "Database connection established"
        );

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run migrations")?;
        Ok(())
    }

    /// A `UserStore` backed by this pool
    pub fn users(&self) -> PgUserStore {
        PgUserStore::new(self.pool.clone())
    }
}
