//! Lookup-or-create for the partner and the shared product class.

use tracing::instrument;

use super::error::SeedError;
use super::events::{SeedEvent, SeedEvents};
use super::model::{NewProductClass, Partner, ProductClass};
use super::store::CatalogStore;

/// Return the partner with `code`, creating it if it does not exist yet.
///
/// # Errors
///
/// Returns [`SeedError::Store`] if the lookup or the insert fails.
#[instrument(skip(store, events))]
pub async fn ensure_partner<S, E>(
    store: &S,
    code: &str,
    name: &str,
    events: &E,
) -> Result<Partner, SeedError>
where
    S: CatalogStore,
    E: SeedEvents,
{
    if let Some(existing) = store.find_partner_by_code(code).await? {
        events.emit(SeedEvent::PartnerFound {
            code: existing.code.clone(),
        });
        return Ok(existing);
    }

    let created = store.create_partner(code, name).await?;
    events.emit(SeedEvent::PartnerCreated {
        code: created.code.clone(),
    });
    Ok(created)
}

/// Return the product class with the definition's slug, creating it if needed.
///
/// An existing class is returned as stored; its flags are not updated.
///
/// # Errors
///
/// Returns [`SeedError::Store`] if the lookup or the insert fails.
#[instrument(skip_all, fields(slug = %definition.slug))]
pub async fn ensure_product_class<S, E>(
    store: &S,
    definition: &NewProductClass,
    events: &E,
) -> Result<ProductClass, SeedError>
where
    S: CatalogStore,
    E: SeedEvents,
{
    if let Some(existing) = store.find_product_class_by_slug(&definition.slug).await? {
        events.emit(SeedEvent::ProductClassFound {
            slug: existing.slug.clone(),
        });
        return Ok(existing);
    }

    let created = store.create_product_class(definition).await?;
    events.emit(SeedEvent::ProductClassCreated {
        slug: created.slug.clone(),
    });
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::events::RecordedEvents;
    use crate::catalog::memory::InMemoryCatalogStore;

    #[tokio::test]
    async fn test_ensure_partner_is_idempotent() {
        let store = InMemoryCatalogStore::new();
        let events = RecordedEvents::new();

        let first = ensure_partner(&store, "digitalstore", "Digital Store", &events)
            .await
            .expect("first");
        let second = ensure_partner(&store, "digitalstore", "Renamed Store", &events)
            .await
            .expect("second");

        assert_eq!(first, second);
        assert_eq!(second.name, "Digital Store");
        assert_eq!(store.partners().len(), 1);
        assert_eq!(
            events.events(),
            vec![
                SeedEvent::PartnerCreated {
                    code: "digitalstore".to_owned()
                },
                SeedEvent::PartnerFound {
                    code: "digitalstore".to_owned()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_ensure_product_class_keeps_stored_flags() {
        let store = InMemoryCatalogStore::new();
        let events = RecordedEvents::new();
        let definition = NewProductClass {
            name: "Digital Products".to_owned(),
            slug: "digital".to_owned(),
            requires_shipping: false,
            track_stock: false,
        };

        let created = ensure_product_class(&store, &definition, &events)
            .await
            .expect("create");
        let shipped = NewProductClass {
            requires_shipping: true,
            ..definition
        };
        let found = ensure_product_class(&store, &shipped, &events)
            .await
            .expect("find");

        assert_eq!(created.id, found.id);
        assert!(!found.requires_shipping);
        assert_eq!(store.product_classes().len(), 1);
    }
}
