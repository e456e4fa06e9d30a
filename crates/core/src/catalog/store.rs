//! Storage seam for the reseed engine.
//!
//! The engine never touches a database directly. Every lookup returns an
//! `Option` so absence is ordinary control flow; errors are reserved for
//! storage failures and constraint violations.

use std::future::Future;

use thiserror::Error;

use super::model::{
    Category, NewCategory, NewProduct, NewProductClass, NewStockRecord, Partner, Product,
    ProductClass, StockRecord,
};
use crate::types::{CategoryId, ProductId};

/// Errors reported by a [`CatalogStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A unique key is already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The store refused the write (e.g. an unusable parent category).
    #[error("rejected: {0}")]
    Rejected(String),

    /// The storage backend failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Create, lookup-by-key and delete-all operations over catalog records.
///
/// Every create is its own unit of work; no transaction spans calls.
pub trait CatalogStore {
    /// Delete every stock record, returning how many were removed.
    fn delete_all_stock_records(&self) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Delete every product (and its category links), returning how many were removed.
    fn delete_all_products(&self) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// All categories at depth 1.
    fn list_root_categories(
        &self,
    ) -> impl Future<Output = Result<Vec<Category>, StoreError>> + Send;

    fn find_category_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<Category>, StoreError>> + Send;

    /// Create a root-level category (depth 1, no parent).
    fn create_root_category(
        &self,
        category: &NewCategory,
    ) -> impl Future<Output = Result<Category, StoreError>> + Send;

    /// Create a category directly beneath `parent`.
    fn create_child_category(
        &self,
        parent: &Category,
        category: &NewCategory,
    ) -> impl Future<Output = Result<Category, StoreError>> + Send;

    fn find_partner_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<Partner>, StoreError>> + Send;

    fn create_partner(
        &self,
        code: &str,
        name: &str,
    ) -> impl Future<Output = Result<Partner, StoreError>> + Send;

    fn find_product_class_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<ProductClass>, StoreError>> + Send;

    fn create_product_class(
        &self,
        class: &NewProductClass,
    ) -> impl Future<Output = Result<ProductClass, StoreError>> + Send;

    fn create_product(
        &self,
        product: &NewProduct,
    ) -> impl Future<Output = Result<Product, StoreError>> + Send;

    /// Link a product to a category.
    fn attach_category(
        &self,
        product_id: ProductId,
        category_id: CategoryId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn create_stock_record(
        &self,
        record: &NewStockRecord,
    ) -> impl Future<Output = Result<StockRecord, StoreError>> + Send;
}
