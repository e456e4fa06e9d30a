//! Catalog reseed command.
//!
//! Deletes every listing and stock record, ensures the category tree, the
//! partner and the product class exist, then creates the built-in catalog.
//!
//! # Usage
//!
//! ```bash
//! ds-cli seed catalog
//! ds-cli seed catalog --dry-run --json --rng-seed 42
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (not needed with `--dry-run`)
//! - `SEED_*` - Run settings, see [`SeedConfig`]

use chrono::{DateTime, Utc};
use digistore_core::catalog::{
    CatalogDefinition, CatalogSeeder, CatalogStore, InMemoryCatalogStore, RunReport, SeedConfig,
    SeedConfigError, SeedError, TracingEvents, builtin_catalog,
};
use digistore_storefront::db::{self, PgCatalogStore};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during a seed command.
#[derive(Debug, Error)]
pub enum SeedCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid seed configuration: {0}")]
    Config(#[from] SeedConfigError),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Catalog reseed aborted: {0}")]
    Seed(#[from] SeedError),

    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Flags of `seed catalog`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOptions {
    pub dry_run: bool,
    pub json: bool,
    pub rng_seed: Option<u64>,
}

/// Run the catalog reseed and return the number of created listings.
///
/// # Errors
///
/// Returns `SeedCommandError` if configuration is invalid, the database is
/// unreachable, or the run aborts on a fatal error.
pub async fn catalog(options: &SeedOptions) -> Result<usize, SeedCommandError> {
    dotenvy::dotenv().ok();

    let config = SeedConfig::from_env()?;
    let definition = builtin_catalog();
    let run_started = Utc::now();

    let report = if options.dry_run {
        info!("Dry run, using in-memory store");
        let store = InMemoryCatalogStore::new();
        run_catalog(&store, &config, &definition, run_started, options.rng_seed).await?
    } else {
        let database_url = super::storefront_database_url()
            .ok_or(SeedCommandError::MissingEnvVar("STOREFRONT_DATABASE_URL"))?;
        let pool = db::create_pool(&database_url).await?;
        info!("Connected to storefront database");
        let store = PgCatalogStore::new(pool);
        run_catalog(&store, &config, &definition, run_started, options.rng_seed).await?
    };

    if options.json {
        #[allow(clippy::print_stdout)]
        {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    } else {
        for line in report.to_string().lines() {
            info!("{line}");
        }
    }

    if report.failed > 0 {
        warn!(failed = report.failed, "Some listings could not be created");
    }

    Ok(report.created)
}

async fn run_catalog<S: CatalogStore>(
    store: &S,
    config: &SeedConfig,
    definition: &CatalogDefinition,
    run_started: DateTime<Utc>,
    rng_seed: Option<u64>,
) -> Result<RunReport, SeedError> {
    let mut rng = rng_seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    CatalogSeeder::new(store, &TracingEvents, config)
        .run(definition, run_started, &mut rng)
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_catalog_against_memory_store() {
        let store = InMemoryCatalogStore::new();
        let config = SeedConfig::default();

        let report = run_catalog(&store, &config, &builtin_catalog(), Utc::now(), Some(9))
            .await
            .unwrap();

        assert_eq!(report.created, 50);
        assert_eq!(report.partner_name, "Digital Store");
        assert_eq!(report.category_count, 6);
    }

    #[tokio::test]
    async fn test_rng_seed_makes_stock_reproducible() {
        let config = SeedConfig::default();
        let first = InMemoryCatalogStore::new();
        let second = InMemoryCatalogStore::new();

        run_catalog(&first, &config, &builtin_catalog(), Utc::now(), Some(42))
            .await
            .unwrap();
        run_catalog(&second, &config, &builtin_catalog(), Utc::now(), Some(42))
            .await
            .unwrap();

        let stock = |store: &InMemoryCatalogStore| -> Vec<i32> {
            store
                .stock_records()
                .into_iter()
                .map(|r| r.num_in_stock)
                .collect()
        };
        assert_eq!(stock(&first), stock(&second));
    }
}
