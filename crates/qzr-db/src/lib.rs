pub mod error;
pub mod keys;
pub mod models;
pub mod records;
pub mod repositories;
pub mod store;

pub use error::StoreError;
pub use store::{KeyValueStore, MemoryStore, SqliteStore};

use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    Sqlite, SqlitePool,
    migrate::MigrateDatabase,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// Create a SQLite connection pool, creating the database file if it is missing.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .context("invalid database url")?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .context("failed to connect to database")?;

    Ok(pool)
}

/// Ensure the database exists and run migrations in this crate's `migrations/` folder.
pub async fn ensure_db_and_migrate(database_url: &str, pool: &SqlitePool) -> anyhow::Result<()> {
    // Ensure database exists (no-op if it already does)
    let exists = Sqlite::database_exists(database_url).await?;
    if !exists {
        Sqlite::create_database(database_url).await?;
    }

    // Run migrations bundled at compile time from `migrations/`
    sqlx::migrate!().run(pool).await?;

    Ok(())
}
