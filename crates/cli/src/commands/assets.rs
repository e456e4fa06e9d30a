//! Digital asset commands.
//!
//! Seeded listings have no downloadable file until one is attached here.
//!
//! # Usage
//!
//! ```bash
//! ds-cli assets attach 42 ebooks/python-guide.pdf
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string
//! - `STOREFRONT_MEDIA_ROOT` - Directory the file path is relative to (default: media)

use std::path::PathBuf;

use digistore_core::ProductId;
use digistore_core::catalog::DigitalAsset;
use digistore_storefront::config::{ConfigError, StorefrontConfig};
use digistore_storefront::db::{self, DigitalAssetRepository, RepositoryError};
use digistore_storefront::routes::downloads::resolve_asset_path;
use thiserror::Error;

/// Errors that can occur during asset operations.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid asset path: {0}")]
    InvalidPath(String),

    #[error("File not found under media root: {0}")]
    FileMissing(PathBuf),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Product {0} already has a digital asset")]
    AlreadyAttached(ProductId),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Attach `file_path` to a product as its downloadable file.
///
/// # Errors
///
/// Returns `AssetError` if the path is invalid or missing on disk, the
/// product does not exist, or it already has an asset.
pub async fn attach(product_id: i32, file_path: &str) -> Result<DigitalAsset, AssetError> {
    let config = StorefrontConfig::from_env()?;
    let product_id = ProductId::new(product_id);

    let full_path = resolve_asset_path(&config.media_root, file_path)
        .map_err(|e| AssetError::InvalidPath(e.to_string()))?;
    if !tokio::fs::try_exists(&full_path).await? {
        return Err(AssetError::FileMissing(full_path));
    }

    let pool = db::create_pool(&config.database_url).await?;
    let assets = DigitalAssetRepository::new(&pool);

    let Some(title) = assets.product_title(product_id).await? else {
        return Err(AssetError::ProductNotFound(product_id));
    };

    let asset = assets
        .create(product_id, file_path)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AssetError::AlreadyAttached(product_id),
            RepositoryError::NotFound => AssetError::ProductNotFound(product_id),
            other => AssetError::Repository(other),
        })?;

    tracing::info!(
        asset_id = %asset.id,
        %product_id,
        %title,
        path = %asset.file_path,
        "Attached digital asset"
    );
    Ok(asset)
}
