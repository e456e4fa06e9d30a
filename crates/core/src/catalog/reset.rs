//! Wipe of the previous listing generation.

use serde::Serialize;
use tracing::instrument;

use super::error::SeedError;
use super::events::{SeedEvent, SeedEvents};
use super::store::CatalogStore;

/// How many records a reset removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResetSummary {
    pub products: u64,
    pub stock_records: u64,
}

/// Delete every stock record and every product.
///
/// There is no filtering: this is a full wipe of the listing tables.
/// Categories, partners and product classes are left untouched.
///
/// # Errors
///
/// Returns [`SeedError::Reset`] if either delete fails. A failure after the
/// stock records were removed leaves them removed; the
/// [`SeedEvent::StockRecordsDeleted`] event already emitted reports how many.
#[instrument(skip_all)]
pub async fn reset_catalog<S, E>(store: &S, events: &E) -> Result<ResetSummary, SeedError>
where
    S: CatalogStore,
    E: SeedEvents,
{
    let stock_records = store
        .delete_all_stock_records()
        .await
        .map_err(SeedError::Reset)?;
    events.emit(SeedEvent::StockRecordsDeleted {
        count: stock_records,
    });

    let products = store
        .delete_all_products()
        .await
        .map_err(SeedError::Reset)?;

    events.emit(SeedEvent::CatalogReset {
        products,
        stock_records,
    });

    Ok(ResetSummary {
        products,
        stock_records,
    })
}
