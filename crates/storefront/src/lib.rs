//! Digistore Storefront library.
//!
//! Serves digital downloads and provides the `PostgreSQL` implementation of
//! the catalog store used by the reseed engine.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
