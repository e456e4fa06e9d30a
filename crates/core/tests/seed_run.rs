//! End-to-end reseed runs against the in-memory store.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};
use digistore_core::catalog::{
    CatalogSeeder, InMemoryCatalogStore, RecordedEvents, SeedConfig, SeedError, SeedEvent,
    builtin_catalog,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn at(second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 5, 9, 30, second).single().unwrap()
}

#[tokio::test]
async fn clean_run_creates_full_catalog() {
    let store = InMemoryCatalogStore::new();
    let events = RecordedEvents::new();
    let config = SeedConfig::default();

    let report = CatalogSeeder::new(&store, &events, &config)
        .run(&builtin_catalog(), at(0), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap();

    assert_eq!(report.created, 50);
    assert_eq!(report.failed, 0);
    assert_eq!(report.category_count, 6);
    assert!(!report.partner_name.is_empty());
    assert_eq!(report.per_category["courses"], 10);
    assert_eq!(store.categories().len(), 7);
    assert_eq!(store.products().len(), 50);
    assert_eq!(store.stock_records().len(), 50);

    let root = store
        .categories()
        .into_iter()
        .find(|c| c.slug == "all")
        .unwrap();
    assert!(
        store
            .categories()
            .iter()
            .filter(|c| c.slug != "all")
            .all(|c| c.parent_id == Some(root.id) && c.depth == 2)
    );
}

#[tokio::test]
async fn second_run_reuses_reference_data_and_recreates_listings() {
    let store = InMemoryCatalogStore::new();
    let config = SeedConfig::default();
    let catalog = builtin_catalog();

    let first_events = RecordedEvents::new();
    CatalogSeeder::new(&store, &first_events, &config)
        .run(&catalog, at(0), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap();
    let categories_after_first = store.categories();
    let partners_after_first = store.partners();

    let events = RecordedEvents::new();
    let report = CatalogSeeder::new(&store, &events, &config)
        .run(&catalog, at(1), &mut StdRng::seed_from_u64(2))
        .await
        .unwrap();

    assert_eq!(report.created, 50);
    assert_eq!(report.deleted_products, 50);
    assert_eq!(report.deleted_stock_records, 50);
    assert_eq!(report.category_count, 6);
    assert_eq!(store.categories(), categories_after_first);
    assert_eq!(store.partners(), partners_after_first);
    assert_eq!(store.partners().len(), 1);
    assert_eq!(store.product_classes().len(), 1);
    assert_eq!(store.products().len(), 50);

    let recorded = events.events();
    assert!(recorded.contains(&SeedEvent::PartnerFound {
        code: "digitalstore".to_owned()
    }));
    assert!(
        !recorded
            .iter()
            .any(|e| matches!(e, SeedEvent::CategoryCreated { .. }))
    );
}

#[tokio::test]
async fn every_code_and_sku_is_distinct() {
    let store = InMemoryCatalogStore::new();
    let config = SeedConfig::default();

    CatalogSeeder::new(&store, &RecordedEvents::new(), &config)
        .run(&builtin_catalog(), at(0), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap();

    let upcs: HashSet<String> = store.products().into_iter().map(|p| p.upc).collect();
    let skus: HashSet<String> = store
        .stock_records()
        .into_iter()
        .map(|r| r.partner_sku)
        .collect();
    assert_eq!(upcs.len(), 50);
    assert_eq!(skus.len(), 50);
}

#[tokio::test]
async fn unusable_root_still_seeds_everything() {
    let store = InMemoryCatalogStore::new();
    store.reject_child_categories();
    let events = RecordedEvents::new();
    let config = SeedConfig::default();

    let report = CatalogSeeder::new(&store, &events, &config)
        .run(&builtin_catalog(), at(0), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap();

    assert_eq!(report.created, 50);
    assert_eq!(report.category_count, 6);
    let degraded = events
        .events()
        .into_iter()
        .filter(|e| matches!(e, SeedEvent::CategoryDegraded { .. }))
        .count();
    assert_eq!(degraded, 6);

    // A later healthy run must not treat the degraded nodes as extra roots.
    store.heal();
    let report = CatalogSeeder::new(&store, &RecordedEvents::new(), &config)
        .run(&builtin_catalog(), at(1), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap();
    assert_eq!(report.created, 50);
    assert_eq!(store.categories().len(), 7);
}

#[tokio::test]
async fn incomplete_taxonomy_creates_no_listings() {
    let store = InMemoryCatalogStore::new();
    let config = SeedConfig::default();
    CatalogSeeder::new(&store, &RecordedEvents::new(), &config)
        .run(&builtin_catalog(), at(0), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap();

    store.fail_category_lookups();
    let events = RecordedEvents::new();
    let err = CatalogSeeder::new(&store, &events, &config)
        .run(&builtin_catalog(), at(1), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::IncompleteTaxonomy { ref missing } if missing.len() == 6));
    assert!(store.products().is_empty());
    assert!(store.stock_records().is_empty());
    assert!(
        !events
            .events()
            .iter()
            .any(|e| matches!(e, SeedEvent::ListingCreated { .. }))
    );
}

#[tokio::test]
async fn reset_failure_aborts_run() {
    let store = InMemoryCatalogStore::new();
    store.fail_deletes();
    let config = SeedConfig::default();

    let err = CatalogSeeder::new(&store, &RecordedEvents::new(), &config)
        .run(&builtin_catalog(), at(0), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::Reset(_)));
    assert!(store.categories().is_empty());
}

#[tokio::test]
async fn stock_failures_are_reported_per_item() {
    let store = InMemoryCatalogStore::new();
    store.fail_stock_records();
    let config = SeedConfig::default();

    let report = CatalogSeeder::new(&store, &RecordedEvents::new(), &config)
        .run(&builtin_catalog(), at(0), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap();

    assert_eq!(report.created, 0);
    assert_eq!(report.failed, 50);
    assert_eq!(report.failures.len(), 50);
    assert_eq!(report.failures[0].index, 1);
    assert_eq!(report.failures[49].title, "3D Models - Premium");
}

#[tokio::test]
async fn root_creation_failure_still_seeds_full_catalog() {
    let store = InMemoryCatalogStore::new();
    store.reject_top_level_category("all");
    let config = SeedConfig::default();

    let events = RecordedEvents::new();
    let report = CatalogSeeder::new(&store, &events, &config)
        .run(&builtin_catalog(), at(0), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap();

    assert_eq!(report.created, 50);
    assert_eq!(report.category_count, 6);
    assert_eq!(store.categories().len(), 6);
    assert!(store.categories().iter().all(|c| c.parent_id.is_none()));
    assert!(
        events
            .events()
            .iter()
            .any(|e| matches!(e, SeedEvent::RootCategoryUnavailable { .. }))
    );

    // The top-level children are reused, not duplicated, while the root stays unavailable.
    let report = CatalogSeeder::new(&store, &RecordedEvents::new(), &config)
        .run(&builtin_catalog(), at(1), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap();
    assert_eq!(report.created, 50);
    assert_eq!(report.category_count, 6);
    assert_eq!(store.categories().len(), 6);
}

#[tokio::test]
async fn child_with_no_placement_aborts_before_listings() {
    let store = InMemoryCatalogStore::new();
    store.reject_child_categories();
    store.reject_top_level_category("ebooks");
    let config = SeedConfig::default();

    let err = CatalogSeeder::new(&store, &RecordedEvents::new(), &config)
        .run(&builtin_catalog(), at(0), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SeedError::IncompleteTaxonomy {
            missing: vec!["ebooks".to_owned()]
        }
    );
    assert!(store.products().is_empty());
    assert!(store.partners().is_empty());
}

#[tokio::test]
async fn partner_failure_is_fatal() {
    let store = InMemoryCatalogStore::new();
    store.fail_partners();
    let config = SeedConfig::default();

    let err = CatalogSeeder::new(&store, &RecordedEvents::new(), &config)
        .run(&builtin_catalog(), at(0), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::Store(_)));
    assert!(store.partners().is_empty());
    assert!(store.products().is_empty());
    assert!(store.stock_records().is_empty());
}

#[tokio::test]
async fn product_class_failure_is_fatal() {
    let store = InMemoryCatalogStore::new();
    store.fail_product_classes();
    let config = SeedConfig::default();

    let err = CatalogSeeder::new(&store, &RecordedEvents::new(), &config)
        .run(&builtin_catalog(), at(0), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::Store(_)));
    assert_eq!(store.partners().len(), 1);
    assert!(store.product_classes().is_empty());
    assert!(store.products().is_empty());
}

#[tokio::test]
async fn failed_product_delete_reports_removed_stock_records() {
    let store = InMemoryCatalogStore::new();
    let config = SeedConfig::default();
    CatalogSeeder::new(&store, &RecordedEvents::new(), &config)
        .run(&builtin_catalog(), at(0), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap();

    store.fail_product_deletes();
    let events = RecordedEvents::new();
    let err = CatalogSeeder::new(&store, &events, &config)
        .run(&builtin_catalog(), at(1), &mut StdRng::seed_from_u64(1))
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::Reset(_)));
    assert!(store.stock_records().is_empty());
    assert_eq!(store.products().len(), 50);
    assert_eq!(
        events.events(),
        vec![SeedEvent::StockRecordsDeleted { count: 50 }]
    );
}
