//! Listing code generation.
//!
//! Codes are `<prefix><run timestamp><index>`, with the timestamp captured
//! once per run at second resolution and the index zero-padded to three
//! digits. Two runs started within the same second produce the same codes;
//! the unique indexes on `upc` and `partner_sku` then reject the duplicates
//! as per-item failures.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default prefix for product codes.
pub const UPC_PREFIX: &str = "UPC";

/// Default prefix for stock record SKUs.
pub const SKU_PREFIX: &str = "SKU";

const STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// The pair of codes assigned to one listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ListingCodes {
    pub upc: String,
    pub sku: String,
}

/// Produces listing codes for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeGenerator {
    stamp: String,
    upc_prefix: String,
    sku_prefix: String,
}

impl CodeGenerator {
    /// Generator with the default `UPC` / `SKU` prefixes.
    #[must_use]
    pub fn new(run_started: DateTime<Utc>) -> Self {
        Self::with_prefixes(run_started, UPC_PREFIX, SKU_PREFIX)
    }

    #[must_use]
    pub fn with_prefixes(
        run_started: DateTime<Utc>,
        upc_prefix: impl Into<String>,
        sku_prefix: impl Into<String>,
    ) -> Self {
        Self {
            stamp: run_started.format(STAMP_FORMAT).to_string(),
            upc_prefix: upc_prefix.into(),
            sku_prefix: sku_prefix.into(),
        }
    }

    /// The run timestamp embedded in every code.
    #[must_use]
    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    /// Codes for the item at 1-based position `index`.
    #[must_use]
    pub fn codes_for(&self, index: usize) -> ListingCodes {
        ListingCodes {
            upc: format!("{}{}{index:03}", self.upc_prefix, self.stamp),
            sku: format!("{}{}{index:03}", self.sku_prefix, self.stamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::TimeZone;

    use super::*;

    fn run_started() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn test_codes_format() {
        let codes = CodeGenerator::new(run_started()).codes_for(7);
        assert_eq!(codes.upc, "UPC20240309140507007");
        assert_eq!(codes.sku, "SKU20240309140507007");
    }

    #[test]
    fn test_custom_prefixes() {
        let generator = CodeGenerator::with_prefixes(run_started(), "DG", "DS");
        assert_eq!(generator.stamp(), "20240309140507");
        assert_eq!(generator.codes_for(12).upc, "DG20240309140507012");
        assert_eq!(generator.codes_for(12).sku, "DS20240309140507012");
    }

    #[test]
    fn test_codes_unique_within_run() {
        let generator = CodeGenerator::new(run_started());
        let codes: Vec<ListingCodes> = (1..=50).map(|i| generator.codes_for(i)).collect();

        let upcs: HashSet<&str> = codes.iter().map(|c| c.upc.as_str()).collect();
        let skus: HashSet<&str> = codes.iter().map(|c| c.sku.as_str()).collect();
        assert_eq!(upcs.len(), 50);
        assert_eq!(skus.len(), 50);
    }

    #[test]
    fn test_distinct_seconds_give_distinct_codes() {
        let later = run_started() + chrono::Duration::seconds(1);
        assert_ne!(
            CodeGenerator::new(run_started()).codes_for(1),
            CodeGenerator::new(later).codes_for(1)
        );
    }
}
