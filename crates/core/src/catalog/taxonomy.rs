//! Category tree construction.
//!
//! Ensures a single root category and a fixed list of children exist,
//! creating only what is missing. Children that cannot be placed under the
//! root are created at the top level instead, so a broken root degrades the
//! tree shape but not the catalog.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::instrument;

use super::error::SeedError;
use super::events::{SeedEvent, SeedEvents};
use super::model::{Category, NewCategory};
use super::store::CatalogStore;

/// The required root of the category tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootDefinition {
    pub name: String,
    pub slug: String,
    pub description: String,
}

impl RootDefinition {
    fn to_new_category(&self) -> NewCategory {
        NewCategory {
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
        }
    }
}

/// A required child category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildDefinition {
    pub slug: String,
    pub name: String,
}

impl ChildDefinition {
    #[must_use]
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
        }
    }

    fn to_new_category(&self) -> NewCategory {
        NewCategory {
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: format!("Category {}", self.name),
        }
    }
}

/// Resolved category tree: the root (if usable) and every required child by slug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    root: Option<Category>,
    categories: BTreeMap<String, Category>,
}

impl Taxonomy {
    #[must_use]
    pub const fn root(&self) -> Option<&Category> {
        self.root.as_ref()
    }

    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&Category> {
        self.categories.get(slug)
    }

    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.categories.contains_key(slug)
    }

    /// Number of resolved child categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Child categories ordered by slug.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.categories
            .iter()
            .map(|(slug, category)| (slug.as_str(), category))
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, category: Category) {
        self.categories.insert(category.slug.clone(), category);
    }
}

/// Ensure the root and every child category exist, returning them by slug.
///
/// # Errors
///
/// - [`SeedError::AmbiguousRoot`] if more than one root candidate exists.
/// - [`SeedError::IncompleteTaxonomy`] if any child could not be resolved.
/// - [`SeedError::Store`] if listing root categories fails.
#[instrument(skip_all, fields(root = %root.slug, children = children.len()))]
pub async fn build_taxonomy<S, E>(
    store: &S,
    root: &RootDefinition,
    children: &[ChildDefinition],
    events: &E,
) -> Result<Taxonomy, SeedError>
where
    S: CatalogStore,
    E: SeedEvents,
{
    let root_category = resolve_root(store, root, children, events).await?;

    let mut categories = BTreeMap::new();
    for child in children {
        if let Some(category) = resolve_child(store, root_category.as_ref(), child, events).await {
            categories.insert(child.slug.clone(), category);
        }
    }

    let missing: Vec<String> = children
        .iter()
        .filter(|child| !categories.contains_key(&child.slug))
        .map(|child| child.slug.clone())
        .collect();
    if !missing.is_empty() {
        return Err(SeedError::IncompleteTaxonomy { missing });
    }

    Ok(Taxonomy {
        root: root_category,
        categories,
    })
}

/// Find or create the root. Top-level nodes whose slug is a required child
/// slug are leftovers of an earlier fallback and are not root candidates.
async fn resolve_root<S, E>(
    store: &S,
    root: &RootDefinition,
    children: &[ChildDefinition],
    events: &E,
) -> Result<Option<Category>, SeedError>
where
    S: CatalogStore,
    E: SeedEvents,
{
    let mut candidates: Vec<Category> = store
        .list_root_categories()
        .await?
        .into_iter()
        .filter(|category| !children.iter().any(|child| child.slug == category.slug))
        .collect();

    if candidates.len() > 1 {
        let mut slugs: Vec<String> = candidates.into_iter().map(|c| c.slug).collect();
        slugs.sort();
        return Err(SeedError::AmbiguousRoot(slugs));
    }

    if let Some(existing) = candidates.pop() {
        events.emit(SeedEvent::RootCategoryFound {
            slug: existing.slug.clone(),
        });
        return Ok(Some(existing));
    }

    match store.create_root_category(&root.to_new_category()).await {
        Ok(created) => {
            events.emit(SeedEvent::RootCategoryCreated {
                slug: created.slug.clone(),
            });
            Ok(Some(created))
        }
        Err(e) => {
            events.emit(SeedEvent::RootCategoryUnavailable {
                error: e.to_string(),
            });
            Ok(None)
        }
    }
}

/// Find a child by slug, else create it under the root, else at the top level.
async fn resolve_child<S, E>(
    store: &S,
    root: Option<&Category>,
    child: &ChildDefinition,
    events: &E,
) -> Option<Category>
where
    S: CatalogStore,
    E: SeedEvents,
{
    match store.find_category_by_slug(&child.slug).await {
        Ok(Some(existing)) => {
            events.emit(SeedEvent::CategoryFound {
                slug: child.slug.clone(),
                name: existing.name.clone(),
            });
            return Some(existing);
        }
        Ok(None) => {}
        Err(e) => {
            events.emit(SeedEvent::CategoryUnresolved {
                slug: child.slug.clone(),
                error: e.to_string(),
            });
            return None;
        }
    }

    let new_category = child.to_new_category();
    let attempt = match root {
        Some(parent) => store
            .create_child_category(parent, &new_category)
            .await
            .map_err(|e| e.to_string()),
        None => Err("no usable root category".to_owned()),
    };

    let degraded_because = match attempt {
        Ok(created) => {
            events.emit(SeedEvent::CategoryCreated {
                slug: child.slug.clone(),
                name: child.name.clone(),
            });
            return Some(created);
        }
        Err(reason) => reason,
    };

    match store.create_root_category(&new_category).await {
        Ok(created) => {
            events.emit(SeedEvent::CategoryDegraded {
                slug: child.slug.clone(),
                name: child.name.clone(),
                error: degraded_because,
            });
            Some(created)
        }
        Err(e) => {
            events.emit(SeedEvent::CategoryUnresolved {
                slug: child.slug.clone(),
                error: e.to_string(),
            });
            None
        }
    }
}
