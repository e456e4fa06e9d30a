//! Progress narration for reseed runs.
//!
//! Components report what they found, created or skipped as [`SeedEvent`]s
//! through an injected [`SeedEvents`] sink. [`TracingEvents`] turns them into
//! structured log lines; [`RecordedEvents`] keeps them for inspection.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::types::Price;

/// A single step of a reseed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SeedEvent {
    /// Emitted before the product delete runs.
    StockRecordsDeleted {
        count: u64,
    },
    CatalogReset {
        products: u64,
        stock_records: u64,
    },
    RootCategoryFound {
        slug: String,
    },
    RootCategoryCreated {
        slug: String,
    },
    /// The root could not be created; children will be created at the top level.
    RootCategoryUnavailable {
        error: String,
    },
    CategoryFound {
        slug: String,
        name: String,
    },
    CategoryCreated {
        slug: String,
        name: String,
    },
    /// Creating the category under the root failed; it was created at the top level instead.
    CategoryDegraded {
        slug: String,
        name: String,
        error: String,
    },
    CategoryUnresolved {
        slug: String,
        error: String,
    },
    PartnerFound {
        code: String,
    },
    PartnerCreated {
        code: String,
    },
    ProductClassFound {
        slug: String,
    },
    ProductClassCreated {
        slug: String,
    },
    ListingCreated {
        index: usize,
        title: String,
        price: Price,
    },
    ListingFailed {
        index: usize,
        title: String,
        error: String,
    },
}

/// Receives progress events from a reseed run.
pub trait SeedEvents {
    fn emit(&self, event: SeedEvent);
}

/// Logs every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEvents;

impl SeedEvents for TracingEvents {
    fn emit(&self, event: SeedEvent) {
        match event {
            SeedEvent::StockRecordsDeleted { count } => info!(count, "Deleted stock records"),
            SeedEvent::CatalogReset {
                products,
                stock_records,
            } => info!(products, stock_records, "Cleared previous listings"),
            SeedEvent::RootCategoryFound { slug } => info!(%slug, "Found root category"),
            SeedEvent::RootCategoryCreated { slug } => info!(%slug, "Created root category"),
            SeedEvent::RootCategoryUnavailable { error } => {
                warn!(%error, "Root category unavailable, categories will be created at top level");
            }
            SeedEvent::CategoryFound { slug, name } => {
                info!(%slug, %name, "Found existing category");
            }
            SeedEvent::CategoryCreated { slug, name } => info!(%slug, %name, "Created category"),
            SeedEvent::CategoryDegraded { slug, name, error } => warn!(
                %slug,
                %name,
                %error,
                "Could not create category under root, created it as a top-level category"
            ),
            SeedEvent::CategoryUnresolved { slug, error } => {
                error!(%slug, %error, "Could not resolve category");
            }
            SeedEvent::PartnerFound { code } => info!(%code, "Found existing partner"),
            SeedEvent::PartnerCreated { code } => info!(%code, "Created partner"),
            SeedEvent::ProductClassFound { slug } => info!(%slug, "Found existing product class"),
            SeedEvent::ProductClassCreated { slug } => info!(%slug, "Created product class"),
            SeedEvent::ListingCreated {
                index,
                title,
                price,
            } => info!(index, %title, %price, "Created listing"),
            SeedEvent::ListingFailed {
                index,
                title,
                error,
            } => error!(index, %title, %error, "Failed to create listing"),
        }
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordedEvents {
    events: Mutex<Vec<SeedEvent>>,
}

impl RecordedEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events emitted so far.
    #[must_use]
    pub fn events(&self) -> Vec<SeedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SeedEvents for RecordedEvents {
    fn emit(&self, event: SeedEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl<T: SeedEvents + ?Sized> SeedEvents for &T {
    fn emit(&self, event: SeedEvent) {
        (**self).emit(event);
    }
}
