//! Reseed run settings.
//!
//! # Environment Variables
//!
//! All optional; defaults in parentheses.
//!
//! - `SEED_PARTNER_CODE` - Reserved partner code (`digitalstore`)
//! - `SEED_PARTNER_NAME` - Partner display name (`Digital Store`)
//! - `SEED_CURRENCY` - ISO 4217 code for listing prices (`RUB`)
//! - `SEED_STOCK_MIN` / `SEED_STOCK_MAX` - Inclusive stock quantity range (`100` / `1000`)
//! - `SEED_LOW_STOCK_THRESHOLD` - Low-stock threshold on every stock record (`10`)

use std::ops::RangeInclusive;
use std::str::FromStr;

use thiserror::Error;

use super::codes::{SKU_PREFIX, UPC_PREFIX};
use super::model::NewProductClass;
use crate::types::CurrencyCode;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum SeedConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Settings for a reseed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    pub partner_code: String,
    pub partner_name: String,
    /// The class every seeded listing belongs to.
    pub product_class: NewProductClass,
    pub currency: CurrencyCode,
    pub stock_min: i32,
    pub stock_max: i32,
    pub low_stock_threshold: i32,
    pub upc_prefix: String,
    pub sku_prefix: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            partner_code: "digitalstore".to_owned(),
            partner_name: "Digital Store".to_owned(),
            product_class: NewProductClass {
                name: "Digital Products".to_owned(),
                slug: "digital".to_owned(),
                requires_shipping: false,
                track_stock: false,
            },
            currency: CurrencyCode::RUB,
            stock_min: 100,
            stock_max: 1000,
            low_stock_threshold: 10,
            upc_prefix: UPC_PREFIX.to_owned(),
            sku_prefix: SKU_PREFIX.to_owned(),
        }
    }
}

impl SeedConfig {
    /// Load overrides from the process environment on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns `SeedConfigError` if a variable is set but cannot be parsed,
    /// or if the stock range is empty.
    pub fn from_env() -> Result<Self, SeedConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load overrides through `lookup` on top of the defaults.
    ///
    /// # Errors
    ///
    /// See [`SeedConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SeedConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(code) = lookup("SEED_PARTNER_CODE") {
            config.partner_code = code;
        }
        if let Some(name) = lookup("SEED_PARTNER_NAME") {
            config.partner_name = name;
        }
        if let Some(currency) = parse_var::<CurrencyCode, _>(&lookup, "SEED_CURRENCY")? {
            config.currency = currency;
        }
        if let Some(min) = parse_var(&lookup, "SEED_STOCK_MIN")? {
            config.stock_min = min;
        }
        if let Some(max) = parse_var(&lookup, "SEED_STOCK_MAX")? {
            config.stock_max = max;
        }
        if let Some(threshold) = parse_var(&lookup, "SEED_LOW_STOCK_THRESHOLD")? {
            config.low_stock_threshold = threshold;
        }

        if config.stock_min < 0 || config.stock_min > config.stock_max {
            return Err(SeedConfigError::InvalidEnvVar(
                "SEED_STOCK_MIN".to_owned(),
                format!(
                    "stock range {}..={} is empty or negative",
                    config.stock_min, config.stock_max
                ),
            ));
        }

        Ok(config)
    }

    /// Inclusive range stock quantities are drawn from.
    #[must_use]
    pub fn stock_range(&self) -> RangeInclusive<i32> {
        self.stock_min..=self.stock_max.max(self.stock_min)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, SeedConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| SeedConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
        })
        .transpose()
}
