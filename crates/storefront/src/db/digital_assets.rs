//! Digital asset repository.

use digistore_core::catalog::DigitalAsset;
use digistore_core::{DigitalAssetId, ProductId};
use sqlx::PgPool;

use super::RepositoryError;

#[derive(sqlx::FromRow)]
struct DigitalAssetRow {
    id: DigitalAssetId,
    product_id: ProductId,
    file_path: String,
}

impl From<DigitalAssetRow> for DigitalAsset {
    fn from(row: DigitalAssetRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            file_path: row.file_path,
        }
    }
}

/// Repository for downloadable files attached to products.
pub struct DigitalAssetRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DigitalAssetRepository<'a> {
    /// Create a new digital asset repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a digital asset by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: DigitalAssetId,
    ) -> Result<Option<DigitalAsset>, RepositoryError> {
        let row = sqlx::query_as::<_, DigitalAssetRow>(
            "SELECT id, product_id, file_path FROM storefront.digital_asset WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(DigitalAsset::from))
    }

    /// Attach a file to a product.
    ///
    /// `file_path` is stored as given and resolved against the media root at
    /// download time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product already has an asset.
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        product_id: ProductId,
        file_path: &str,
    ) -> Result<DigitalAsset, RepositoryError> {
        let row = sqlx::query_as::<_, DigitalAssetRow>(
            r"
            INSERT INTO storefront.digital_asset (product_id, file_path)
            VALUES ($1, $2)
            RETURNING id, product_id, file_path
            ",
        )
        .bind(product_id)
        .bind(file_path)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_insert(e, &format!("digital asset for product {product_id}"))
        })?;

        Ok(row.into())
    }

    /// Title of the product an asset would belong to, if the product exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn product_title(
        &self,
        product_id: ProductId,
    ) -> Result<Option<String>, RepositoryError> {
        let title = sqlx::query_scalar::<_, String>(
            "SELECT title FROM storefront.product WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(title)
    }
}
