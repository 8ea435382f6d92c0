//! Tracing setup for the recipe-store binary
//!
//! Usage:
//!   recipe-store --debug ...               # Debug logging to stderr
//!   RECIPE_LOG=recipe_store_lib=debug ...  # Fine-grained log control
//!
//! `RECIPE_LOG` wins over `RUST_LOG`; with neither set the level is `info`
//! (or `debug` with `--debug`).

use crate::error::{RecipeError, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "RECIPE_LOG";

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging unless a filter is set in the environment
    pub debug: bool,
}

fn build_filter(config: &TracingConfig) -> EnvFilter {
    let fallback = if config.debug { "debug" } else { "info" };

    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize console tracing. Fails if a subscriber is already installed.
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_target(config.debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| RecipeError::Config(format!("tracing already initialized: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let config = TracingConfig { debug: true };
        // Whichever test gets here first wins; a repeat must error, not panic
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }
}
