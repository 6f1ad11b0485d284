use std::sync::Arc;

use uuid::Uuid;

use crate::features::business::models::Business;
use crate::features::categories::models::Category;
use crate::features::ordering::models::MenuSnapshot;
use crate::features::products::models::Product;
use crate::modules::store::{Query, RemoteStore, Repository, StoreError};
use crate::shared::constants::{FIELD_BUSINESS_ID, FIELD_DISPLAY_ORDER};

/// Fetches the full menu of one business from the remote store
#[derive(Clone)]
pub struct SnapshotLoader {
    business_id: Uuid,
    categories: Repository<Category>,
    products: Repository<Product>,
    businesses: Repository<Business>,
}

impl SnapshotLoader {
    pub fn new(store: Arc<dyn RemoteStore>, business_id: Uuid) -> Self {
        Self {
            business_id,
            categories: Repository::new(Arc::clone(&store)),
            products: Repository::new(Arc::clone(&store)),
            businesses: Repository::new(store),
        }
    }

    pub fn business_id(&self) -> Uuid {
        self.business_id
    }

    pub async fn fetch(&self) -> Result<MenuSnapshot, StoreError> {
        let scoped = Query::new()
            .eq(FIELD_BUSINESS_ID, self.business_id.to_string())
            .order_asc(FIELD_DISPLAY_ORDER);

        let (business, categories, products) = tokio::try_join!(
            self.businesses.get(self.business_id),
            self.categories.list(&scoped),
            self.products.list(&scoped),
        )?;

        tracing::debug!(
            "Fetched menu for business {}: {} categories, {} products",
            self.business_id,
            categories.len(),
            products.len()
        );

        Ok(MenuSnapshot::new(business, categories, products))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{seeded_store, MenuFixture};

    #[tokio::test]
    async fn test_fetch_groups_products_per_category() {
        let fixture = MenuFixture::two_categories();
        let store = seeded_store(&fixture);
        let loader = SnapshotLoader::new(store, fixture.business.id);

        let snapshot = loader.fetch().await.unwrap();

        assert_eq!(snapshot.categories.len(), 2);
        let x_members: Vec<Uuid> = snapshot
            .products_in(fixture.categories[0].id)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(x_members, vec![fixture.products[0].id, fixture.products[1].id]);
    }

    #[tokio::test]
    async fn test_missing_business_is_not_found() {
        let fixture = MenuFixture::two_categories();
        let store = seeded_store(&fixture);
        let loader = SnapshotLoader::new(store, Uuid::new_v4());

        assert!(matches!(loader.fetch().await, Err(StoreError::NotFound(_))));
    }
}
