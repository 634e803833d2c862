//! SQLite database connection and migration management.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use super::{SqliteAccountRepository, SqliteCategoryRepository, SqliteTransactionRepository};
use super::helpers::map_sqlx_error;
use crate::config::ConnectionConfig;
use crate::db::{DbError, DbResult};

// Embed migrations from data/sql/sqlite/ at compile time
static MIGRATOR: Migrator = sqlx::migrate!("data/sql/sqlite");

/// Path value selecting an in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// SQLite database handle owning the shared connection pool.
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open a pool as described by the connection configuration.
    pub async fn connect(config: &ConnectionConfig) -> DbResult<Self> {
        config.validate().map_err(|e| DbError::Configuration {
            message: e.to_string(),
        })?;

        if config.path == IN_MEMORY_PATH {
            return Self::in_memory().await;
        }

        let timeout = Duration::from_secs(config.timeout);
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(timeout);

        let pool = SqlitePoolOptions::new()
            .min_connections(config.max_idle_conns)
            .max_connections(config.max_open_conns)
            .acquire_timeout(timeout)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        info!(path = %config.path, "Opened SQLite database");
        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// The pool keeps exactly one connection alive forever, since the
    /// database disappears with its last connection.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Wrap an already-open pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run pending migrations.
    pub async fn migrate(&self) -> DbResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;
        info!("Database migrations complete");
        Ok(())
    }

    /// The shared pool handle.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Verify the store is reachable.
    pub async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    pub fn accounts(&self) -> SqliteAccountRepository {
        SqliteAccountRepository::new(self.pool.clone())
    }

    pub fn categories(&self) -> SqliteCategoryRepository {
        SqliteCategoryRepository::new(self.pool.clone())
    }

    pub fn transactions(&self) -> SqliteTransactionRepository {
        SqliteTransactionRepository::new(self.pool.clone())
    }
}
