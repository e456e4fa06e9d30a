//! Fatal errors of a reseed run.

use thiserror::Error;

use super::store::StoreError;

/// Errors that abort a reseed run.
///
/// Per-listing failures are not errors at this level; they are recorded in
/// the [`SeedOutcome`](super::SeedOutcome) and the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    /// Wiping the previous generation of listings failed.
    #[error("catalog reset failed: {0}")]
    Reset(#[source] StoreError),

    /// More than one root-level node could be the taxonomy root.
    #[error("ambiguous root category, {} candidates found: {}", .0.len(), .0.join(", "))]
    AmbiguousRoot(Vec<String>),

    /// Required child categories could not be resolved.
    #[error("taxonomy incomplete, unresolved categories: {}", .missing.join(", "))]
    IncompleteTaxonomy { missing: Vec<String> },

    /// A catalog item points at a category the taxonomy does not define.
    #[error("catalog item {index} ({title}) references unknown category '{slug}'")]
    UnknownCategory {
        index: usize,
        title: String,
        slug: String,
    },

    /// Storage failure while provisioning reference data.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
