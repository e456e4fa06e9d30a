//! Listing creation.
//!
//! Every item of the catalog definition becomes a product, a category link
//! and a stock record. Items are independent: a failure on one is recorded
//! and the loop moves on, leaving whatever that item already committed.

use std::collections::BTreeMap;

use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument};

use super::codes::CodeGenerator;
use super::config::SeedConfig;
use super::error::SeedError;
use super::events::{SeedEvent, SeedEvents};
use super::model::{NewProduct, NewStockRecord, Partner, ProductClass};
use super::store::CatalogStore;
use super::taxonomy::Taxonomy;
use crate::types::{Price, ProductId, ProductStructure, StockRecordId};

/// One entry of the fixed catalog definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub title: String,
    pub category_slug: String,
    /// Amount in the configured currency.
    pub price: Decimal,
    pub description: String,
}

impl CatalogItem {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        category_slug: impl Into<String>,
        price: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category_slug: category_slug.into(),
            price,
            description: description.into(),
        }
    }
}

/// Everything [`seed_products`] needs besides the store.
#[derive(Debug, Clone, Copy)]
pub struct SeedRequest<'a> {
    pub items: &'a [CatalogItem],
    pub taxonomy: &'a Taxonomy,
    pub partner: &'a Partner,
    pub product_class: &'a ProductClass,
    pub codes: &'a CodeGenerator,
    pub config: &'a SeedConfig,
}

/// A successfully created listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedListing {
    pub product_id: ProductId,
    pub stock_record_id: StockRecordId,
    pub upc: String,
    pub sku: String,
    pub price: Price,
    pub num_in_stock: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    Created(CreatedListing),
    Failed { error: String },
}

/// Result for a single catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemResult {
    /// 1-based position in the catalog definition.
    pub index: usize,
    pub title: String,
    pub category_slug: String,
    pub outcome: ItemOutcome,
}

impl ItemResult {
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self.outcome, ItemOutcome::Created(_))
    }
}

/// Per-item results of a seeding pass, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedOutcome {
    pub results: Vec<ItemResult>,
}

impl SeedOutcome {
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_created()).count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.len() - self.created_count()
    }

    /// Failed items with their error message.
    pub fn failures(&self) -> impl Iterator<Item = (&ItemResult, &str)> {
        self.results.iter().filter_map(|r| match &r.outcome {
            ItemOutcome::Failed { error } => Some((r, error.as_str())),
            ItemOutcome::Created(_) => None,
        })
    }

    /// Number of created listings per category slug.
    #[must_use]
    pub fn created_per_category(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for result in self.results.iter().filter(|r| r.is_created()) {
            *counts.entry(result.category_slug.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Check that every item points at a category the taxonomy resolved.
///
/// # Errors
///
/// Returns [`SeedError::UnknownCategory`] for the first offending item.
pub fn validate_items(items: &[CatalogItem], taxonomy: &Taxonomy) -> Result<(), SeedError> {
    for (index, item) in (1..).zip(items) {
        if !taxonomy.contains(&item.category_slug) {
            return Err(SeedError::UnknownCategory {
                index,
                title: item.title.clone(),
                slug: item.category_slug.clone(),
            });
        }
    }
    Ok(())
}

/// Create a listing for every item, isolating per-item failures.
#[instrument(skip_all, fields(items = request.items.len()))]
pub async fn seed_products<S, R, E>(
    store: &S,
    request: &SeedRequest<'_>,
    rng: &mut R,
    events: &E,
) -> SeedOutcome
where
    S: CatalogStore,
    R: Rng,
    E: SeedEvents,
{
    let mut results = Vec::with_capacity(request.items.len());

    for (index, item) in (1..).zip(request.items) {
        let num_in_stock = rng.random_range(request.config.stock_range());
        let outcome = match create_listing(store, request, index, item, num_in_stock).await {
            Ok(listing) => {
                events.emit(SeedEvent::ListingCreated {
                    index,
                    title: item.title.clone(),
                    price: listing.price,
                });
                ItemOutcome::Created(listing)
            }
            Err(error) => {
                events.emit(SeedEvent::ListingFailed {
                    index,
                    title: item.title.clone(),
                    error: error.clone(),
                });
                ItemOutcome::Failed { error }
            }
        };

        results.push(ItemResult {
            index,
            title: item.title.clone(),
            category_slug: item.category_slug.clone(),
            outcome,
        });
    }

    SeedOutcome { results }
}

async fn create_listing<S: CatalogStore>(
    store: &S,
    request: &SeedRequest<'_>,
    index: usize,
    item: &CatalogItem,
    num_in_stock: i32,
) -> Result<CreatedListing, String> {
    let codes = request.codes.codes_for(index);
    let price =
        Price::positive(item.price, request.config.currency).map_err(|e| e.to_string())?;
    let category = request
        .taxonomy
        .get(&item.category_slug)
        .ok_or_else(|| format!("unknown category '{}'", item.category_slug))?;

    let product = store
        .create_product(&NewProduct {
            title: item.title.clone(),
            description: item.description.clone(),
            product_class_id: request.product_class.id,
            upc: codes.upc.clone(),
            structure: ProductStructure::Standalone,
            is_discountable: true,
        })
        .await
        .map_err(|e| e.to_string())?;
    debug!(product_id = %product.id, upc = %codes.upc, "Created product");

    store
        .attach_category(product.id, category.id)
        .await
        .map_err(|e| e.to_string())?;

    let stock_record = store
        .create_stock_record(&NewStockRecord {
            product_id: product.id,
            partner_id: request.partner.id,
            partner_sku: codes.sku.clone(),
            price,
            num_in_stock,
            low_stock_threshold: request.config.low_stock_threshold,
        })
        .await
        .map_err(|e| e.to_string())?;

    Ok(CreatedListing {
        product_id: product.id,
        stock_record_id: stock_record.id,
        upc: codes.upc,
        sku: codes.sku,
        price,
        num_in_stock,
    })
}
