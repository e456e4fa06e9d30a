//! Digistore CLI - Database migrations, catalog reseed and asset management.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! ds-cli migrate storefront
//!
//! # Wipe listings and rebuild the built-in catalog
//! ds-cli seed catalog
//!
//! # Same run against an in-memory store, printing the report as JSON
//! ds-cli seed catalog --dry-run --json
//!
//! # Attach a downloadable file to a listing
//! ds-cli assets attach 42 ebooks/python-guide.pdf
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed catalog` - Reseed the storefront catalog
//! - `assets attach` - Attach a digital asset to a product

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ds-cli")]
#[command(author, version, about = "Digistore CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Seed the database
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Manage digital assets
    Assets {
        #[command(subcommand)]
        action: AssetAction,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run storefront database migrations
    Storefront,
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Delete all listings and recreate the built-in catalog
    Catalog {
        /// Run against an in-memory store instead of the database
        #[arg(long)]
        dry_run: bool,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,

        /// Seed for stock quantities, for reproducible runs
        #[arg(long)]
        rng_seed: Option<u64>,
    },
}

#[derive(Subcommand)]
enum AssetAction {
    /// Attach a file (relative to the media root) to a product
    Attach {
        /// Product ID
        product_id: i32,

        /// File path relative to `STOREFRONT_MEDIA_ROOT`
        file_path: String,
    },
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Storefront => commands::migrate::storefront().await?,
        },
        Commands::Seed { target } => match target {
            SeedTarget::Catalog {
                dry_run,
                json,
                rng_seed,
            } => {
                let options = commands::seed::SeedOptions {
                    dry_run,
                    json,
                    rng_seed,
                };
                let created = commands::seed::catalog(&options).await?;
                tracing::info!(created, "Seed command finished");
            }
        },
        Commands::Assets { action } => match action {
            AssetAction::Attach {
                product_id,
                file_path,
            } => {
                commands::assets::attach(product_id, &file_path).await?;
            }
        },
    }
    Ok(())
}
