//! Digistore Core - Catalog types and the catalog reseed engine.
//!
//! This crate is shared by every Digistore component:
//! - `storefront` - Public site that serves digital downloads
//! - `cli` - Command-line tools for migrations, reseeding and asset management
//!
//! # Architecture
//!
//! The core crate performs no I/O of its own. Storage is reached only through
//! the [`catalog::CatalogStore`] trait, implemented by the storefront's
//! `PostgreSQL` repository and by the in-memory store used for dry runs and
//! tests.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and product structure
//! - [`catalog`] - Catalog records, the storage trait and the reseed engine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use types::*;
