//! In-memory [`CatalogStore`] used for dry runs and tests.
//!
//! Enforces the same unique keys and references as the `PostgreSQL` schema,
//! and can be told to misbehave so failure paths can be exercised.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::model::{
    Category, NewCategory, NewProduct, NewProductClass, NewStockRecord, Partner, Product,
    ProductClass, StockRecord,
};
use super::store::{CatalogStore, StoreError};
use crate::types::{CategoryId, PartnerId, ProductClassId, ProductId, StockRecordId};

/// Catalog store backed by plain vectors behind a mutex.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i32,
    categories: Vec<Category>,
    partners: Vec<Partner>,
    product_classes: Vec<ProductClass>,
    products: Vec<Product>,
    product_categories: Vec<(ProductId, CategoryId)>,
    stock_records: Vec<StockRecord>,
    faults: Faults,
}

#[derive(Debug, Default)]
struct Faults {
    reject_child_categories: bool,
    rejected_top_level_slugs: Vec<String>,
    fail_deletes: bool,
    fail_product_deletes: bool,
    fail_stock_records: bool,
    fail_category_lookups: bool,
    fail_partners: bool,
    fail_product_classes: bool,
}

impl MemoryState {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn insert_category(
        &mut self,
        category: &NewCategory,
        depth: i32,
        parent_id: Option<CategoryId>,
    ) -> Result<Category, StoreError> {
        if self.categories.iter().any(|c| c.slug == category.slug) {
            return Err(StoreError::Conflict(format!(
                "category slug '{}' already exists",
                category.slug
            )));
        }
        let created = Category {
            id: CategoryId::new(self.next_id()),
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            depth,
            parent_id,
        };
        self.categories.push(created.clone());
        Ok(created)
    }
}

impl InMemoryCatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every `create_child_category` call fail, as if the root were unusable.
    pub fn reject_child_categories(&self) {
        self.lock().faults.reject_child_categories = true;
    }

    /// Make `create_root_category` fail for `slug`.
    ///
    /// Applies to the root itself and to children falling back to the top level.
    pub fn reject_top_level_category(&self, slug: &str) {
        self.lock()
            .faults
            .rejected_top_level_slugs
            .push(slug.to_owned());
    }

    /// Make both delete-all operations fail.
    pub fn fail_deletes(&self) {
        self.lock().faults.fail_deletes = true;
    }

    /// Make only `delete_all_products` fail; stock records still delete.
    pub fn fail_product_deletes(&self) {
        self.lock().faults.fail_product_deletes = true;
    }

    /// Make every `create_partner` call fail.
    pub fn fail_partners(&self) {
        self.lock().faults.fail_partners = true;
    }

    /// Make every `create_product_class` call fail.
    pub fn fail_product_classes(&self) {
        self.lock().faults.fail_product_classes = true;
    }

    /// Make every `find_category_by_slug` call fail.
    pub fn fail_category_lookups(&self) {
        self.lock().faults.fail_category_lookups = true;
    }

    /// Make every `create_stock_record` call fail.
    pub fn fail_stock_records(&self) {
        self.lock().faults.fail_stock_records = true;
    }

    /// Clear all injected faults.
    pub fn heal(&self) {
        self.lock().faults = Faults::default();
    }

    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.lock().categories.clone()
    }

    #[must_use]
    pub fn partners(&self) -> Vec<Partner> {
        self.lock().partners.clone()
    }

    #[must_use]
    pub fn product_classes(&self) -> Vec<ProductClass> {
        self.lock().product_classes.clone()
    }

    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    #[must_use]
    pub fn stock_records(&self) -> Vec<StockRecord> {
        self.lock().stock_records.clone()
    }

    /// Category IDs linked to a product.
    #[must_use]
    pub fn categories_of(&self, product_id: ProductId) -> Vec<CategoryId> {
        self.lock()
            .product_categories
            .iter()
            .filter(|(product, _)| *product == product_id)
            .map(|(_, category)| *category)
            .collect()
    }
}

impl CatalogStore for InMemoryCatalogStore {
    async fn delete_all_stock_records(&self) -> Result<u64, StoreError> {
        let mut state = self.lock();
        if state.faults.fail_deletes {
            return Err(StoreError::Backend("delete stock records failed".to_owned()));
        }
        let removed = state.stock_records.len() as u64;
        state.stock_records.clear();
        Ok(removed)
    }

    async fn delete_all_products(&self) -> Result<u64, StoreError> {
        let mut state = self.lock();
        if state.faults.fail_deletes || state.faults.fail_product_deletes {
            return Err(StoreError::Backend("delete products failed".to_owned()));
        }
        let removed = state.products.len() as u64;
        state.products.clear();
        state.product_categories.clear();
        // Mirrors ON DELETE CASCADE from product to stock record.
        state.stock_records.clear();
        Ok(removed)
    }

    async fn list_root_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self
            .lock()
            .categories
            .iter()
            .filter(|c| c.is_root_level())
            .cloned()
            .collect())
    }

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        let state = self.lock();
        if state.faults.fail_category_lookups {
            return Err(StoreError::Backend(format!("lookup of category '{slug}' failed")));
        }
        Ok(state.categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn create_root_category(&self, category: &NewCategory) -> Result<Category, StoreError> {
        let mut state = self.lock();
        if state
            .faults
            .rejected_top_level_slugs
            .contains(&category.slug)
        {
            return Err(StoreError::Rejected(format!(
                "category '{}' cannot be created at the top level",
                category.slug
            )));
        }
        state.insert_category(category, 1, None)
    }

    async fn create_child_category(
        &self,
        parent: &Category,
        category: &NewCategory,
    ) -> Result<Category, StoreError> {
        let mut state = self.lock();
        if state.faults.reject_child_categories {
            return Err(StoreError::Rejected(format!(
                "category '{}' cannot take children",
                parent.slug
            )));
        }
        let Some(stored_parent) = state.categories.iter().find(|c| c.id == parent.id) else {
            return Err(StoreError::NotFound(format!("parent category {}", parent.id)));
        };
        let depth = stored_parent.depth + 1;
        state.insert_category(category, depth, Some(parent.id))
    }

    async fn find_partner_by_code(&self, code: &str) -> Result<Option<Partner>, StoreError> {
        Ok(self.lock().partners.iter().find(|p| p.code == code).cloned())
    }

    async fn create_partner(&self, code: &str, name: &str) -> Result<Partner, StoreError> {
        let mut state = self.lock();
        if state.faults.fail_partners {
            return Err(StoreError::Backend("insert partner failed".to_owned()));
        }
        if state.partners.iter().any(|p| p.code == code) {
            return Err(StoreError::Conflict(format!(
                "partner code '{code}' already exists"
            )));
        }
        let partner = Partner {
            id: PartnerId::new(state.next_id()),
            code: code.to_owned(),
            name: name.to_owned(),
        };
        state.partners.push(partner.clone());
        Ok(partner)
    }

    async fn find_product_class_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ProductClass>, StoreError> {
        Ok(self
            .lock()
            .product_classes
            .iter()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn create_product_class(
        &self,
        class: &NewProductClass,
    ) -> Result<ProductClass, StoreError> {
        let mut state = self.lock();
        if state.faults.fail_product_classes {
            return Err(StoreError::Backend("insert product class failed".to_owned()));
        }
        if state.product_classes.iter().any(|c| c.slug == class.slug) {
            return Err(StoreError::Conflict(format!(
                "product class slug '{}' already exists",
                class.slug
            )));
        }
        let created = ProductClass {
            id: ProductClassId::new(state.next_id()),
            name: class.name.clone(),
            slug: class.slug.clone(),
            requires_shipping: class.requires_shipping,
            track_stock: class.track_stock,
        };
        state.product_classes.push(created.clone());
        Ok(created)
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, StoreError> {
        let mut state = self.lock();
        if !state
            .product_classes
            .iter()
            .any(|c| c.id == product.product_class_id)
        {
            return Err(StoreError::NotFound(format!(
                "product class {}",
                product.product_class_id
            )));
        }
        if state.products.iter().any(|p| p.upc == product.upc) {
            return Err(StoreError::Conflict(format!(
                "product upc '{}' already exists",
                product.upc
            )));
        }
        let created = Product {
            id: ProductId::new(state.next_id()),
            title: product.title.clone(),
            description: product.description.clone(),
            product_class_id: product.product_class_id,
            upc: product.upc.clone(),
            structure: product.structure,
            is_discountable: product.is_discountable,
        };
        state.products.push(created.clone());
        Ok(created)
    }

    async fn attach_category(
        &self,
        product_id: ProductId,
        category_id: CategoryId,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        if !state.products.iter().any(|p| p.id == product_id) {
            return Err(StoreError::NotFound(format!("product {product_id}")));
        }
        if !state.categories.iter().any(|c| c.id == category_id) {
            return Err(StoreError::NotFound(format!("category {category_id}")));
        }
        if !state.product_categories.contains(&(product_id, category_id)) {
            state.product_categories.push((product_id, category_id));
        }
        Ok(())
    }

    async fn create_stock_record(&self, record: &NewStockRecord) -> Result<StockRecord, StoreError> {
        let mut state = self.lock();
        if state.faults.fail_stock_records {
            return Err(StoreError::Backend("insert stock record failed".to_owned()));
        }
        if !state.products.iter().any(|p| p.id == record.product_id) {
            return Err(StoreError::NotFound(format!("product {}", record.product_id)));
        }
        if !state.partners.iter().any(|p| p.id == record.partner_id) {
            return Err(StoreError::NotFound(format!("partner {}", record.partner_id)));
        }
        if state
            .stock_records
            .iter()
            .any(|r| r.partner_sku == record.partner_sku)
        {
            return Err(StoreError::Conflict(format!(
                "partner sku '{}' already exists",
                record.partner_sku
            )));
        }
        let created = StockRecord {
            id: StockRecordId::new(state.next_id()),
            product_id: record.product_id,
            partner_id: record.partner_id,
            partner_sku: record.partner_sku.clone(),
            price: record.price,
            num_in_stock: record.num_in_stock,
            low_stock_threshold: record.low_stock_threshold,
        };
        state.stock_records.push(created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_category(slug: &str) -> NewCategory {
        NewCategory {
            name: slug.to_uppercase(),
            slug: slug.to_owned(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_child_category_gets_parent_depth_plus_one() {
        let store = InMemoryCatalogStore::new();
        let root = store
            .create_root_category(&new_category("all"))
            .await
            .expect("root");
        let child = store
            .create_child_category(&root, &new_category("music"))
            .await
            .expect("child");

        assert_eq!(root.depth, 1);
        assert_eq!(child.depth, 2);
        assert_eq!(child.parent_id, Some(root.id));
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_conflict() {
        let store = InMemoryCatalogStore::new();
        store
            .create_root_category(&new_category("all"))
            .await
            .expect("root");
        let err = store
            .create_root_category(&new_category("all"))
            .await
            .expect_err("duplicate slug");
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_rejected_children_and_heal() {
        let store = InMemoryCatalogStore::new();
        let root = store
            .create_root_category(&new_category("all"))
            .await
            .expect("root");

        store.reject_child_categories();
        let err = store
            .create_child_category(&root, &new_category("music"))
            .await
            .expect_err("rejected");
        assert!(matches!(err, StoreError::Rejected(_)));

        store.heal();
        assert!(
            store
                .create_child_category(&root, &new_category("music"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_rejected_top_level_slug_only_blocks_that_slug() {
        let store = InMemoryCatalogStore::new();
        store.reject_top_level_category("all");

        let err = store
            .create_root_category(&new_category("all"))
            .await
            .expect_err("rejected");
        assert!(matches!(err, StoreError::Rejected(_)));
        assert!(
            store
                .create_root_category(&new_category("music"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_list_root_categories_only_returns_depth_one() {
        let store = InMemoryCatalogStore::new();
        let root = store
            .create_root_category(&new_category("all"))
            .await
            .expect("root");
        store
            .create_child_category(&root, &new_category("music"))
            .await
            .expect("child");

        let roots = store.list_root_categories().await.expect("list");
        assert_eq!(roots.len(), 1);
        assert_eq!(roots.first().map(|c| c.slug.as_str()), Some("all"));
    }
}
