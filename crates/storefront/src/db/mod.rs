//! Database operations for storefront `PostgreSQL`.
//!
//! # Schema: `storefront`
//!
//! ## Tables
//!
//! - `category` - Category tree (root nodes at depth 1)
//! - `partner` - Fulfilment partners
//! - `product_class` - Product classes
//! - `product` - Listings
//! - `product_category` - Listing to category links
//! - `stock_record` - Price and stock per listing and partner
//! - `digital_asset` - Downloadable file per listing
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p digistore-cli -- migrate storefront
//! ```

use std::time::Duration;

use digistore_core::catalog::StoreError;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod catalog;
pub mod digital_assets;

pub use catalog::PgCatalogStore;
pub use digital_assets::DigitalAssetRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique slug).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map unique violations to `Conflict`, everything else to `Database`.
    pub(crate) fn from_insert(e: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(format!("{what} already exists"));
        }
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_foreign_key_violation()
        {
            return Self::NotFound;
        }
        Self::Database(e)
    }
}

impl From<RepositoryError> for StoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            RepositoryError::NotFound => Self::NotFound("referenced row".to_owned()),
            RepositoryError::DataCorruption(msg) => Self::Backend(format!("data corruption: {msg}")),
            RepositoryError::Database(e) => Self::Backend(e.to_string()),
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_into_store_error() {
        assert_eq!(
            StoreError::from(RepositoryError::Conflict("product upc already exists".to_owned())),
            StoreError::Conflict("product upc already exists".to_owned())
        );
        assert!(matches!(
            StoreError::from(RepositoryError::DataCorruption("bad currency".to_owned())),
            StoreError::Backend(msg) if msg.contains("bad currency")
        ));
        assert!(matches!(
            StoreError::from(RepositoryError::NotFound),
            StoreError::NotFound(_)
        ));
    }
}
