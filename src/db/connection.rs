/// Database connection management with connection pooling
///
/// `Database` owns the pool. It is opened once at startup, shared by
/// reference (or `Arc`) and closed explicitly at shutdown.

use crate::config::StoreConfig;
use crate::error::{RecipeError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::future::Future;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: Arc<SqlitePool>,
    database_url: String,
    query_timeout: Duration,
}

impl Database {
    /// Open (creating if needed) the SQLite file at `db_path` with default settings
    pub async fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let url = format!("sqlite:{}", db_path.as_ref().display());
        Self::connect(&StoreConfig::new(url)).await
    }

    /// Open the database described by `config`
    ///
    /// # Returns
    /// * `Ok(Database)` - pool is up and the schema is in place
    /// * `Err(RecipeError)` - the store could not be reached; callers treat
    ///   this as fatal at startup
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .disable_statement_logging();

        // Create parent directory if it doesn't exist
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.query_timeout)
            .connect_with(options)
            .await?;

        let db = Self {
            pool: Arc::new(pool),
            database_url: config.database_url.clone(),
            query_timeout: config.query_timeout,
        };

        db.initialize_schema().await?;
        info!(url = %db.database_url, "recipe store opened");

        Ok(db)
    }

    /// Create a test database in memory
    ///
    /// A single never-recycled connection, since every in-memory connection
    /// is its own database.
    #[cfg(test)]
    pub async fn new_test() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self {
            pool: Arc::new(pool),
            database_url: "sqlite::memory:".to_string(),
            query_timeout: crate::config::DEFAULT_QUERY_TIMEOUT,
        };

        db.initialize_schema().await?;

        Ok(db)
    }

    /// Create all tables and seed lookup rows if they don't exist
    async fn initialize_schema(&self) -> Result<()> {
        let schema = include_str!("../../database/schema.sql");

        // sqlx runs one statement per call here, so split on ';'
        for statement in schema.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed).execute(self.pool.as_ref()).await?;
            }
        }

        debug!("schema initialized");
        Ok(())
    }

    /// Run one store call under the configured deadline
    pub(crate) async fn with_deadline<T, E, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, E>>,
        E: Into<RecipeError>,
    {
        match tokio::time::timeout(self.query_timeout, call).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => {
                warn!(operation, timeout_ms = self.query_timeout.as_millis() as u64, "store call timed out");
                Err(RecipeError::Timeout(self.query_timeout))
            }
        }
    }

    /// Get reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Same database, different per-call deadline
    pub fn with_query_timeout(&self, query_timeout: Duration) -> Self {
        Self {
            query_timeout,
            ..self.clone()
        }
    }

    /// Close all connections in the pool
    ///
    /// Should be called on application shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
        info!(url = %self.database_url, "recipe store closed");
    }

    /// Row counts and pool usage, for the status command
    pub async fn stats(&self) -> Result<StoreStats> {
        self.with_deadline("stats", async {
            let recipe_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipe")
                .fetch_one(self.pool())
                .await?;

            let author_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM author")
                .fetch_one(self.pool())
                .await?;

            let category_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM category")
                .fetch_one(self.pool())
                .await?;

            let difficulty_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM dificulty")
                .fetch_one(self.pool())
                .await?;

            Ok::<_, sqlx::Error>(StoreStats {
                total_recipes: recipe_count.0,
                total_authors: author_count.0,
                total_categories: category_count.0,
                total_difficulties: difficulty_count.0,
                pool_size: self.pool.size(),
                idle_connections: self.pool.num_idle(),
            })
        })
        .await
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub total_recipes: i64,
    pub total_authors: i64,
    pub total_categories: i64,
    pub total_difficulties: i64,
    pub pool_size: u32,
    pub idle_connections: usize,
}
