//! Catalog record types.
//!
//! `New*` structs are creation payloads; the plain structs are stored records
//! carrying their database IDs.

use serde::{Deserialize, Serialize};

use crate::types::{
    CategoryId, DigitalAssetId, PartnerId, Price, ProductClassId, ProductId, ProductStructure,
    StockRecordId,
};

/// A node in the category tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Unique across the whole tree.
    pub slug: String,
    pub description: String,
    /// Root-level nodes have depth 1.
    pub depth: i32,
    /// `None` for root-level nodes.
    pub parent_id: Option<CategoryId>,
}

impl Category {
    /// Whether this node sits at the top of the tree.
    #[must_use]
    pub const fn is_root_level(&self) -> bool {
        self.depth == 1
    }
}

/// Payload for creating a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: String,
}

/// Vendor record that owns stock records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub id: PartnerId,
    /// Unique partner code.
    pub code: String,
    pub name: String,
}

/// Template describing shipping and stock behaviour shared by products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductClass {
    pub id: ProductClassId,
    pub name: String,
    pub slug: String,
    pub requires_shipping: bool,
    pub track_stock: bool,
}

/// Payload for creating a product class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductClass {
    pub name: String,
    pub slug: String,
    pub requires_shipping: bool,
    pub track_stock: bool,
}

/// A sellable catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub product_class_id: ProductClassId,
    /// Globally unique product code.
    pub upc: String,
    pub structure: ProductStructure,
    pub is_discountable: bool,
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub product_class_id: ProductClassId,
    pub upc: String,
    pub structure: ProductStructure,
    pub is_discountable: bool,
}

/// Price and availability of a product at a partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: StockRecordId,
    pub product_id: ProductId,
    pub partner_id: PartnerId,
    /// Unique across all stock records.
    pub partner_sku: String,
    pub price: Price,
    pub num_in_stock: i32,
    pub low_stock_threshold: i32,
}

/// Payload for creating a stock record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStockRecord {
    pub product_id: ProductId,
    pub partner_id: PartnerId,
    pub partner_sku: String,
    pub price: Price,
    pub num_in_stock: i32,
    pub low_stock_threshold: i32,
}

/// A downloadable file attached to exactly one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalAsset {
    pub id: DigitalAssetId,
    pub product_id: ProductId,
    /// Path relative to the storefront media root (e.g. `digital/course.zip`).
    pub file_path: String,
}
