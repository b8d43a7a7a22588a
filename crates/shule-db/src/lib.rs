//! # Shule DB
//!
//! SQLite connection pool and the embedded schema migrations.
//!
//! ```ignore
//! use shule_config::DatabaseConfig;
//!
//! let pool = shule_db::init_db_pool(&DatabaseConfig::from_env()).await?;
//! shule_db::run_migrations(&pool).await?;
//! ```

use std::str::FromStr;
use std::time::Duration;

use shule_config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::info;

pub use sqlx::SqlitePool;

/// Opens (and creates if missing) the SQLite database.
///
/// Foreign keys are enforced on every connection and writers wait up to five
/// seconds for the database lock instead of failing with `SQLITE_BUSY`.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .connect_with(options)
        .await?;

    info!(url = %config.url, "database pool ready");
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_pool_migrates() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };
        let pool = init_db_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'registration_counters'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }
}
