//! Summary of a reseed run.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::model::{Partner, ProductClass};
use super::reset::ResetSummary;
use super::seeder::SeedOutcome;
use super::taxonomy::Taxonomy;

/// A listing that could not be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureLine {
    pub index: usize,
    pub title: String,
    pub error: String,
}

/// Aggregated result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub deleted_products: u64,
    pub deleted_stock_records: u64,
    pub created: usize,
    pub failed: usize,
    pub failures: Vec<FailureLine>,
    pub partner_name: String,
    pub product_class_name: String,
    /// Resolved child categories, excluding the root.
    pub category_count: usize,
    /// Created listings per category slug. Categories with none are listed with 0.
    pub per_category: BTreeMap<String, usize>,
}

impl RunReport {
    #[must_use]
    pub fn new(
        reset: ResetSummary,
        taxonomy: &Taxonomy,
        partner: &Partner,
        product_class: &ProductClass,
        outcome: &SeedOutcome,
    ) -> Self {
        let mut per_category: BTreeMap<String, usize> = taxonomy
            .categories()
            .map(|(slug, _)| (slug.to_owned(), 0))
            .collect();
        per_category.extend(outcome.created_per_category());

        Self {
            deleted_products: reset.products,
            deleted_stock_records: reset.stock_records,
            created: outcome.created_count(),
            failed: outcome.failed_count(),
            failures: outcome
                .failures()
                .map(|(result, error)| FailureLine {
                    index: result.index,
                    title: result.title.clone(),
                    error: error.to_owned(),
                })
                .collect(),
            partner_name: partner.name.clone(),
            product_class_name: product_class.name.clone(),
            category_count: taxonomy.len(),
            per_category,
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Removed {} products and {} stock records",
            self.deleted_products, self.deleted_stock_records
        )?;
        writeln!(f, "Created {} listings ({} failed)", self.created, self.failed)?;
        writeln!(f, "Partner: {}", self.partner_name)?;
        writeln!(f, "Product class: {}", self.product_class_name)?;
        writeln!(f, "Categories: {}", self.category_count)?;
        for (slug, count) in &self.per_category {
            writeln!(f, "  {slug}: {count}")?;
        }
        if !self.failures.is_empty() {
            writeln!(f, "Failures:")?;
            for failure in &self.failures {
                writeln!(f, "  #{} {}: {}", failure.index, failure.title, failure.error)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::model::Category;
    use crate::catalog::seeder::{CreatedListing, ItemOutcome, ItemResult};
    use crate::types::{
        CategoryId, CurrencyCode, PartnerId, Price, ProductClassId, ProductId, StockRecordId,
    };

    fn taxonomy() -> Taxonomy {
        let mut taxonomy = Taxonomy::default();
        for (id, slug) in [(2, "music"), (3, "software")] {
            taxonomy.insert(Category {
                id: CategoryId::new(id),
                name: slug.to_owned(),
                slug: slug.to_owned(),
                description: String::new(),
                depth: 2,
                parent_id: Some(CategoryId::new(1)),
            });
        }
        taxonomy
    }

    fn created(index: usize, slug: &str) -> ItemResult {
        ItemResult {
            index,
            title: format!("Item {index}"),
            category_slug: slug.to_owned(),
            outcome: ItemOutcome::Created(CreatedListing {
                product_id: ProductId::new(10),
                stock_record_id: StockRecordId::new(11),
                upc: "UPC".to_owned(),
                sku: "SKU".to_owned(),
                price: Price::new(Decimal::ONE, CurrencyCode::RUB),
                num_in_stock: 100,
            }),
        }
    }

    #[test]
    fn test_report_aggregates_outcome() {
        let outcome = SeedOutcome {
            results: vec![
                created(1, "software"),
                ItemResult {
                    index: 2,
                    title: "Broken".to_owned(),
                    category_slug: "software".to_owned(),
                    outcome: ItemOutcome::Failed {
                        error: "conflict".to_owned(),
                    },
                },
                created(3, "software"),
            ],
        };
        let partner = Partner {
            id: PartnerId::new(1),
            code: "digitalstore".to_owned(),
            name: "Digital Store".to_owned(),
        };
        let class = ProductClass {
            id: ProductClassId::new(1),
            name: "Digital Products".to_owned(),
            slug: "digital".to_owned(),
            requires_shipping: false,
            track_stock: false,
        };

        let report = RunReport::new(
            ResetSummary {
                products: 5,
                stock_records: 4,
            },
            &taxonomy(),
            &partner,
            &class,
            &outcome,
        );

        assert_eq!(report.created, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.category_count, 2);
        assert_eq!(report.per_category.get("software"), Some(&2));
        assert_eq!(report.per_category.get("music"), Some(&0));
        assert_eq!(
            report.failures,
            vec![FailureLine {
                index: 2,
                title: "Broken".to_owned(),
                error: "conflict".to_owned(),
            }]
        );

        let text = report.to_string();
        assert!(text.contains("Created 2 listings (1 failed)"));
        assert!(text.contains("#2 Broken: conflict"));
    }
}
