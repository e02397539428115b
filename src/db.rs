// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use crate::config::DatabaseConfig;
use anyhow::{anyhow, Context, Result};
use diesel::Connection;
use diesel_async::{
    async_connection_wrapper::AsyncConnectionWrapper,
    pooled_connection::{
        deadpool::{Object, Pool, PoolError},
        AsyncDieselConnectionManager,
    },
    AsyncPgConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection = Object<AsyncPgConnection>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database manager holding the connection pool
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Create a new database manager with connection pool
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.url);

        let pool = DbPool::builder(manager)
            .max_size(config.max_connections as usize)
            .build()
            .context("Failed to build database pool")?;

        let db = Self { pool };

        // Test connection and run migrations
        db.initialize(&config.url).await?;

        Ok(db)
    }

    async fn initialize(&self, url: &str) -> Result<()> {
        let _conn = self
            .get_connection()
            .await
            .context("Failed to connect to the database")?;
        info!("Successfully connected to the database");

        Self::run_migrations(url.to_string()).await
    }

    /// Apply pending migrations over a blocking wrapper of the async connection
    async fn run_migrations(url: String) -> Result<()> {
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&url)
                .context("Failed to open migration connection")?;
            conn.run_pending_migrations(MIGRATIONS)
                .map_err(|e| anyhow!("Failed to run migrations: {}", e))?;
            Ok(())
        })
        .await
        .context("Migration task panicked")??;

        info!("Database migrations applied successfully");
        Ok(())
    }

    /// Get a database connection from the pool
    pub async fn get_connection(&self) -> Result<DbConnection, PoolError> {
        self.pool.get().await
    }
}

/// Initialize database connection pool and run migrations
pub async fn init_database(config: &DatabaseConfig) -> Result<Database> {
    Database::new(config).await
}
