//! `PostgreSQL` implementation of [`CatalogStore`].

use std::str::FromStr;

use digistore_core::catalog::{
    CatalogStore, Category, NewCategory, NewProduct, NewProductClass, NewStockRecord, Partner,
    Product, ProductClass, StockRecord, StoreError,
};
use digistore_core::{
    CategoryId, CurrencyCode, PartnerId, Price, ProductClassId, ProductId, ProductStructure,
    StockRecordId,
};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::RepositoryError;

/// Catalog store backed by the `storefront` schema.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert_category(
        &self,
        category: &NewCategory,
        depth: i32,
        parent_id: Option<CategoryId>,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            INSERT INTO storefront.category (name, slug, description, depth, parent_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, slug, description, depth, parent_id
            ",
        )
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(depth)
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "category slug"))?;

        Ok(row.into())
    }
}

// =============================================================================
// Row types
// =============================================================================

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    name: String,
    slug: String,
    description: String,
    depth: i32,
    parent_id: Option<CategoryId>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            depth: row.depth,
            parent_id: row.parent_id,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PartnerRow {
    id: PartnerId,
    code: String,
    name: String,
}

impl From<PartnerRow> for Partner {
    fn from(row: PartnerRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            name: row.name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductClassRow {
    id: ProductClassId,
    name: String,
    slug: String,
    requires_shipping: bool,
    track_stock: bool,
}

impl From<ProductClassRow> for ProductClass {
    fn from(row: ProductClassRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            requires_shipping: row.requires_shipping,
            track_stock: row.track_stock,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    title: String,
    description: String,
    product_class_id: ProductClassId,
    upc: String,
    structure: ProductStructure,
    is_discountable: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            product_class_id: row.product_class_id,
            upc: row.upc,
            structure: row.structure,
            is_discountable: row.is_discountable,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StockRecordRow {
    id: StockRecordId,
    product_id: ProductId,
    partner_id: PartnerId,
    partner_sku: String,
    price: Decimal,
    price_currency: String,
    num_in_stock: i32,
    low_stock_threshold: i32,
}

impl TryFrom<StockRecordRow> for StockRecord {
    type Error = RepositoryError;

    fn try_from(row: StockRecordRow) -> Result<Self, Self::Error> {
        let currency = CurrencyCode::from_str(&row.price_currency).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid currency in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            product_id: row.product_id,
            partner_id: row.partner_id,
            partner_sku: row.partner_sku,
            price: Price::new(row.price, currency),
            num_in_stock: row.num_in_stock,
            low_stock_threshold: row.low_stock_threshold,
        })
    }
}

// =============================================================================
// CatalogStore
// =============================================================================

impl CatalogStore for PgCatalogStore {
    async fn delete_all_stock_records(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM storefront.stock_record")
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        Ok(result.rows_affected())
    }

    async fn delete_all_products(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM storefront.product")
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        Ok(result.rows_affected())
    }

    async fn list_root_categories(&self) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, name, slug, description, depth, parent_id
            FROM storefront.category
            WHERE depth = 1
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, name, slug, description, depth, parent_id
            FROM storefront.category
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.map(Category::from))
    }

    async fn create_root_category(&self, category: &NewCategory) -> Result<Category, StoreError> {
        Ok(self.insert_category(category, 1, None).await?)
    }

    async fn create_child_category(
        &self,
        parent: &Category,
        category: &NewCategory,
    ) -> Result<Category, StoreError> {
        // Depth comes from the stored parent, not the caller's copy.
        let parent_depth: Option<i32> =
            sqlx::query_scalar("SELECT depth FROM storefront.category WHERE id = $1")
                .bind(parent.id)
                .fetch_optional(&self.pool)
                .await
                .map_err(RepositoryError::from)?;

        let Some(parent_depth) = parent_depth else {
            return Err(StoreError::NotFound(format!("parent category {}", parent.id)));
        };

        Ok(self
            .insert_category(category, parent_depth + 1, Some(parent.id))
            .await?)
    }

    async fn find_partner_by_code(&self, code: &str) -> Result<Option<Partner>, StoreError> {
        let row = sqlx::query_as::<_, PartnerRow>(
            "SELECT id, code, name FROM storefront.partner WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.map(Partner::from))
    }

    async fn create_partner(&self, code: &str, name: &str) -> Result<Partner, StoreError> {
        let row = sqlx::query_as::<_, PartnerRow>(
            r"
            INSERT INTO storefront.partner (code, name)
            VALUES ($1, $2)
            RETURNING id, code, name
            ",
        )
        .bind(code)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "partner code"))?;

        Ok(row.into())
    }

    async fn find_product_class_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ProductClass>, StoreError> {
        let row = sqlx::query_as::<_, ProductClassRow>(
            r"
            SELECT id, name, slug, requires_shipping, track_stock
            FROM storefront.product_class
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.map(ProductClass::from))
    }

    async fn create_product_class(
        &self,
        class: &NewProductClass,
    ) -> Result<ProductClass, StoreError> {
        let row = sqlx::query_as::<_, ProductClassRow>(
            r"
            INSERT INTO storefront.product_class (name, slug, requires_shipping, track_stock)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, slug, requires_shipping, track_stock
            ",
        )
        .bind(&class.name)
        .bind(&class.slug)
        .bind(class.requires_shipping)
        .bind(class.track_stock)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "product class slug"))?;

        Ok(row.into())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO storefront.product
                (title, description, product_class_id, upc, structure, is_discountable)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, product_class_id, upc, structure, is_discountable
            ",
        )
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.product_class_id)
        .bind(&product.upc)
        .bind(product.structure)
        .bind(product.is_discountable)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, &format!("product upc '{}'", product.upc)))?;

        Ok(row.into())
    }

    async fn attach_category(
        &self,
        product_id: ProductId,
        category_id: CategoryId,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"
            INSERT INTO storefront.product_category (product_id, category_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(product_id)
        .bind(category_id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "category link"))?;

        Ok(())
    }

    async fn create_stock_record(&self, record: &NewStockRecord) -> Result<StockRecord, StoreError> {
        let row = sqlx::query_as::<_, StockRecordRow>(
            r"
            INSERT INTO storefront.stock_record
                (product_id, partner_id, partner_sku, price, price_currency,
                 num_in_stock, low_stock_threshold)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, product_id, partner_id, partner_sku, price,
                      price_currency, num_in_stock, low_stock_threshold
            ",
        )
        .bind(record.product_id)
        .bind(record.partner_id)
        .bind(&record.partner_sku)
        .bind(record.price.amount)
        .bind(record.price.currency_code.code())
        .bind(record.num_in_stock)
        .bind(record.low_stock_threshold)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_insert(e, &format!("partner sku '{}'", record.partner_sku))
        })?;

        Ok(StockRecord::try_from(row)?)
    }
}
