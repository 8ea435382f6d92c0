/// recipe-store library
///
/// Data access for a recipe catalog: recipes plus the author, category and
/// difficulty lookups they reference.

pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod tracing_setup;

// Re-exports for convenience
pub use config::StoreConfig;
pub use crate::core::RecipeCatalog;
pub use db::Database;
pub use error::{RecipeError, Result};
