//! End-to-end reseed run.

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{info, instrument};

use super::codes::CodeGenerator;
use super::config::SeedConfig;
use super::error::SeedError;
use super::events::SeedEvents;
use super::partner::{ensure_partner, ensure_product_class};
use super::report::RunReport;
use super::reset::reset_catalog;
use super::seeder::{CatalogItem, SeedRequest, seed_products, validate_items};
use super::store::CatalogStore;
use super::taxonomy::{ChildDefinition, RootDefinition, build_taxonomy};

/// A full catalog: the category tree plus the listings to create in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDefinition {
    pub root: RootDefinition,
    pub children: Vec<ChildDefinition>,
    pub items: Vec<CatalogItem>,
}

/// Runs the reseed pipeline against a store.
#[derive(Debug)]
pub struct CatalogSeeder<'a, S, E> {
    store: &'a S,
    events: &'a E,
    config: &'a SeedConfig,
}

impl<'a, S, E> CatalogSeeder<'a, S, E>
where
    S: CatalogStore,
    E: SeedEvents,
{
    #[must_use]
    pub const fn new(store: &'a S, events: &'a E, config: &'a SeedConfig) -> Self {
        Self {
            store,
            events,
            config,
        }
    }

    /// Wipe listings, ensure reference data, then create every listing.
    ///
    /// `run_started` is embedded in every listing code, so pass the time the
    /// run began, not the time of each insert.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if the reset fails, the taxonomy cannot be
    /// completed, the partner or product class cannot be provisioned, or an
    /// item references an unknown category. Per-listing failures are not
    /// errors; they are reported in the returned [`RunReport`].
    #[instrument(skip_all, fields(items = definition.items.len()))]
    pub async fn run<R: Rng>(
        &self,
        definition: &CatalogDefinition,
        run_started: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<RunReport, SeedError> {
        let reset = reset_catalog(self.store, self.events).await?;

        let taxonomy =
            build_taxonomy(self.store, &definition.root, &definition.children, self.events)
                .await?;

        let partner = ensure_partner(
            self.store,
            &self.config.partner_code,
            &self.config.partner_name,
            self.events,
        )
        .await?;
        let product_class =
            ensure_product_class(self.store, &self.config.product_class, self.events).await?;

        validate_items(&definition.items, &taxonomy)?;

        let codes = CodeGenerator::with_prefixes(
            run_started,
            self.config.upc_prefix.as_str(),
            self.config.sku_prefix.as_str(),
        );
        let request = SeedRequest {
            items: &definition.items,
            taxonomy: &taxonomy,
            partner: &partner,
            product_class: &product_class,
            codes: &codes,
            config: self.config,
        };
        let outcome = seed_products(self.store, &request, rng, self.events).await;

        let report = RunReport::new(reset, &taxonomy, &partner, &product_class, &outcome);
        info!(
            created = report.created,
            failed = report.failed,
            categories = report.category_count,
            "Catalog reseed finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::catalog::events::RecordedEvents;
    use crate::catalog::fixtures::builtin_catalog;
    use crate::catalog::memory::InMemoryCatalogStore;

    #[tokio::test]
    async fn test_unknown_category_aborts_before_listings() {
        let store = InMemoryCatalogStore::new();
        let events = RecordedEvents::new();
        let config = SeedConfig::default();
        let mut definition = builtin_catalog();
        definition.children.retain(|child| child.slug != "assets");
        let run_started = Utc
            .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("timestamp");

        let err = CatalogSeeder::new(&store, &events, &config)
            .run(&definition, run_started, &mut StdRng::seed_from_u64(3))
            .await
            .expect_err("unknown category");

        assert!(matches!(err, SeedError::UnknownCategory { index: 46, .. }));
        assert!(store.products().is_empty());
    }
}
