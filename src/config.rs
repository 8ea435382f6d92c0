/// Store configuration
///
/// Read from the environment by the binary. Tests build it directly.

use crate::error::{RecipeError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default maximum number of pooled connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default per-call deadline
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

pub const ENV_DATABASE_URL: &str = "RECIPE_DATABASE_URL";
pub const ENV_MAX_CONNECTIONS: &str = "RECIPE_DB_MAX_CONNECTIONS";
pub const ENV_QUERY_TIMEOUT_MS: &str = "RECIPE_QUERY_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// sqlx connection URL, e.g. `sqlite:/path/to/recipes.db`
    pub database_url: String,
    pub max_connections: u32,
    /// Deadline applied to every store call
    pub query_timeout: Duration,
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Build a config from `RECIPE_*` environment variables
    ///
    /// Unset variables fall back to defaults. Set-but-garbage values are an
    /// error instead of being ignored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match lookup(ENV_DATABASE_URL) {
            Some(url) if !url.trim().is_empty() => url,
            _ => default_database_url()?,
        };

        let mut config = Self::new(database_url);

        if let Some(raw) = lookup(ENV_MAX_CONNECTIONS) {
            config.max_connections = raw.trim().parse().map_err(|_| {
                RecipeError::Config(format!("{} must be a positive integer, got '{}'", ENV_MAX_CONNECTIONS, raw))
            })?;
            if config.max_connections == 0 {
                return Err(RecipeError::Config(format!(
                    "{} must be at least 1",
                    ENV_MAX_CONNECTIONS
                )));
            }
        }

        if let Some(raw) = lookup(ENV_QUERY_TIMEOUT_MS) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                RecipeError::Config(format!("{} must be milliseconds, got '{}'", ENV_QUERY_TIMEOUT_MS, raw))
            })?;
            if millis == 0 {
                return Err(RecipeError::Config(format!(
                    "{} must be at least 1",
                    ENV_QUERY_TIMEOUT_MS
                )));
            }
            config.query_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

/// Path of the database file used when no URL is configured
pub fn default_database_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| RecipeError::Config("could not find home directory".to_string()))?;
    Ok(home.join(".recipe-store").join("recipes.db"))
}

fn default_database_url() -> Result<String> {
    Ok(format!("sqlite:{}", default_database_path()?.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_reads_all_variables() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (ENV_DATABASE_URL, "sqlite::memory:"),
            (ENV_MAX_CONNECTIONS, "2"),
            (ENV_QUERY_TIMEOUT_MS, "1500"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.query_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_defaults_when_unset() {
        let config =
            StoreConfig::from_lookup(lookup_from(&[(ENV_DATABASE_URL, "sqlite::memory:")])).unwrap();

        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.query_timeout, DEFAULT_QUERY_TIMEOUT);
    }

    #[test]
    fn test_garbage_timeout_is_an_error() {
        let result = StoreConfig::from_lookup(lookup_from(&[
            (ENV_DATABASE_URL, "sqlite::memory:"),
            (ENV_QUERY_TIMEOUT_MS, "soon"),
        ]));

        assert!(matches!(result, Err(RecipeError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = StoreConfig::from_lookup(lookup_from(&[
            (ENV_DATABASE_URL, "sqlite::memory:"),
            (ENV_QUERY_TIMEOUT_MS, "0"),
        ]));

        assert!(matches!(result, Err(RecipeError::Config(_))));
    }

    #[test]
    fn test_builders_override_defaults() {
        let config = StoreConfig::new("sqlite::memory:")
            .with_query_timeout(Duration::from_millis(750))
            .with_max_connections(1);

        assert_eq!(config.query_timeout, Duration::from_millis(750));
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn test_zero_connections_rejected() {
        let result = StoreConfig::from_lookup(lookup_from(&[
            (ENV_DATABASE_URL, "sqlite::memory:"),
            (ENV_MAX_CONNECTIONS, "0"),
        ]));

        assert!(result.is_err());
    }
}
