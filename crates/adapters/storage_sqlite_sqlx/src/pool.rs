//! `SQLite` connection handle setup and table bootstrap.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use crate::error::StorageError;

/// Creates `shopping_list` when the database does not have it yet. An
/// existing table is used as-is.
const CREATE_SHOPPING_LIST: &str = r"
    CREATE TABLE IF NOT EXISTS shopping_list (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        product_name TEXT NOT NULL,
        price_cents INTEGER NOT NULL CHECK (price_cents >= 0),
        category TEXT NOT NULL,
        checked BOOLEAN NOT NULL DEFAULT 0,
        date_added TEXT NOT NULL
    )
";

/// Configuration for the `SQLite` storage adapter.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:shoplist.db` or `sqlite::memory:`).
    pub database_url: String,
}

impl Config {
    /// Build a [`Database`] from this configuration.
    ///
    /// Opens the connection pool, creates the database file if missing,
    /// and makes sure the `shopping_list` table exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is malformed or the store cannot
    /// be reached.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self.database_url).await
    }
}

/// Holds the `SQLite` connection pool and provides access to it.
///
/// Call [`Database::close`] when done so pending connections are released.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and bootstrap the schema.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or bootstrap fails.
    async fn initialize(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await?;

        sqlx::query(CREATE_SHOPPING_LIST).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every connection and wait for them to shut down.
    pub async fn close(self) {
        self.pool.close().await;
    }
}
