//! Connection pool setup and `Customers` table DDL.

use crate::error::AppError;
use crate::settings::Settings;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool on `DATABASE_URL`, creating the database file if it does not exist.
/// In-memory URLs get the single pinned connection of [`connect_in_memory`].
pub async fn connect(settings: &Settings) -> Result<SqlitePool, AppError> {
    if is_in_memory(&settings.database_url) {
        tracing::info!(url = %settings.database_url, "using private in-memory database");
        return connect_in_memory().await;
    }
    let options = SqliteConnectOptions::from_str(&settings.database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await?;
    tracing::info!(url = %settings.database_url, "connected to database");
    Ok(pool)
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Single-connection pool on a private in-memory database. Used by tests and
/// ephemeral runs; the connection is never recycled so the data survives.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    Ok(pool)
}

/// Create the `Customers` table and its email lookup index if missing.
pub async fn ensure_customers_table(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS Customers (
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            Prefix TEXT,
            Suffix TEXT,
            FirstName TEXT NOT NULL,
            MiddleName TEXT,
            LastName TEXT NOT NULL,
            Email TEXT NOT NULL,
            PhoneNumber TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS IX_Customers_Email ON Customers (Email)")
        .execute(pool)
        .await?;
    Ok(())
}
