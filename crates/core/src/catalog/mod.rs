//! Catalog records and the idempotent catalog reseed engine.
//!
//! A reseed run wipes the previous generation of listings and rebuilds the
//! catalog from a fixed definition:
//!
//! ```text
//! reset_catalog ──► build_taxonomy ──► ensure_partner ──► ensure_product_class
//!                        │ (completeness gate)                     │
//!                        └──────────────► seed_products ◄──────────┘
//!                                              │
//!                                          RunReport
//! ```
//!
//! Reference data (categories, the partner, the product class) is looked up
//! by its unique key before it is created, so repeated runs never duplicate
//! it. Listings are recreated on every run; a failure on one listing is
//! recorded and the run moves on to the next item.
//!
//! All storage goes through [`CatalogStore`]; progress narration goes through
//! [`SeedEvents`].

pub mod codes;
pub mod config;
pub mod error;
pub mod events;
pub mod fixtures;
pub mod memory;
pub mod model;
pub mod partner;
pub mod report;
pub mod reset;
pub mod run;
pub mod seeder;
pub mod store;
pub mod taxonomy;

pub use codes::{CodeGenerator, ListingCodes};
pub use config::{SeedConfig, SeedConfigError};
pub use error::SeedError;
pub use events::{RecordedEvents, SeedEvent, SeedEvents, TracingEvents};
pub use fixtures::builtin_catalog;
pub use memory::InMemoryCatalogStore;
pub use model::{
    Category, DigitalAsset, NewCategory, NewProduct, NewProductClass, NewStockRecord, Partner,
    Product, ProductClass, StockRecord,
};
pub use partner::{ensure_partner, ensure_product_class};
pub use report::{FailureLine, RunReport};
pub use reset::{ResetSummary, reset_catalog};
pub use run::{CatalogDefinition, CatalogSeeder};
pub use seeder::{
    CatalogItem, CreatedListing, ItemOutcome, ItemResult, SeedOutcome, SeedRequest,
    seed_products, validate_items,
};
pub use store::{CatalogStore, StoreError};
pub use taxonomy::{ChildDefinition, RootDefinition, Taxonomy, build_taxonomy};
