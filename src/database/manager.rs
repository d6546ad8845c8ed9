use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const CREATE_PRODUCTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        title       VARCHAR(100) NOT NULL,
        description TEXT NOT NULL,
        price       REAL NOT NULL
    )
"#;

/// Owns pool construction and schema bootstrap for the products database
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open the pool described by `config` and create the schema if absent.
    pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl(config.url.clone()))?
            .create_if_missing(true);

        // Every connection to an in-memory database is a separate database,
        // so such pools are pinned to one connection that never expires.
        let pool = if Self::is_in_memory(&config.url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.max_connections.max(1))
                .connect_with(options)
                .await?
        };

        Self::ensure_schema(&pool).await?;

        info!("Connected to products database at {}", config.url);
        Ok(pool)
    }

    pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_PRODUCTS_TABLE).execute(pool).await?;
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &SqlitePool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    fn is_in_memory(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
        }
    }

    #[test]
    fn detects_in_memory_urls() {
        assert!(DatabaseManager::is_in_memory("sqlite::memory:"));
        assert!(DatabaseManager::is_in_memory("sqlite://file:shared?mode=memory&cache=shared"));
        assert!(!DatabaseManager::is_in_memory("sqlite://products.db"));
    }

    #[tokio::test]
    async fn connect_creates_schema() {
        let pool = DatabaseManager::connect(&memory_config()).await.unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);

        // Bootstrapping twice is harmless
        DatabaseManager::ensure_schema(&pool).await.unwrap();
        DatabaseManager::health_check(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_malformed_url() {
        let config = DatabaseConfig {
            url: "sqlite://products.db?mode=bogus".to_string(),
            max_connections: 1,
        };
        assert!(matches!(
            DatabaseManager::connect(&config).await,
            Err(DatabaseError::InvalidDatabaseUrl(_))
        ));
    }
}
