/// Database module for recipe-store
///
/// Handles all database operations using SQLite and sqlx.

pub mod connection;
pub mod models;
pub mod queries;

pub use connection::{Database, StoreStats};
pub use models::*;
pub use queries::PREVIEW_LIMIT;
