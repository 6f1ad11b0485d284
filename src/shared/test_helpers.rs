#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use std::time::Duration;

#[cfg(test)]
use rust_decimal::Decimal;
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::features::business::models::Business;
#[cfg(test)]
use crate::features::categories::models::{Category, NamePosition};
#[cfg(test)]
use crate::features::ordering::Reconciler;
#[cfg(test)]
use crate::features::preview::PreviewSignal;
#[cfg(test)]
use crate::features::products::models::Product;
#[cfg(test)]
use crate::modules::store::memory::InMemoryStore;
#[cfg(test)]
use crate::modules::store::Collection;

#[cfg(test)]
pub fn business() -> Business {
    Business {
        id: Uuid::new_v4(),
        name: "Kedai Test".to_string(),
        cover_image_url: None,
        instagram_url: None,
        created_at: None,
    }
}

#[cfg(test)]
pub fn category(business_id: Uuid, name: &str, display_order: i32) -> Category {
    Category {
        id: Uuid::new_v4(),
        business_id,
        name: name.to_string(),
        description: None,
        display_order,
        is_available: true,
        name_position: NamePosition::default(),
        image_url: None,
        created_at: None,
    }
}

#[cfg(test)]
pub fn product(
    business_id: Uuid,
    category_id: Option<Uuid>,
    name: &str,
    display_order: i32,
) -> Product {
    Product {
        id: Uuid::new_v4(),
        business_id,
        category_id,
        name: name.to_string(),
        description: None,
        price: Decimal::new(2500, 2),
        display_order,
        is_available: true,
        image_url: None,
        created_at: None,
    }
}

/// A business with its categories and products, in display order
#[cfg(test)]
#[allow(dead_code)]
pub struct MenuFixture {
    pub business: Business,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

#[cfg(test)]
#[allow(dead_code)]
impl MenuFixture {
    /// Categories `A(0)`, `B(1)`, `C(2)` without products
    pub fn three_categories() -> Self {
        let business = business();
        let categories = vec![
            category(business.id, "A", 0),
            category(business.id, "B", 1),
            category(business.id, "C", 2),
        ];
        Self {
            business,
            categories,
            products: vec![],
        }
    }

    /// `X: [p1(0), p2(1)]`, `Y: [p3(0)]`
    pub fn two_categories() -> Self {
        let business = business();
        let x = category(business.id, "X", 0);
        let y = category(business.id, "Y", 1);
        let products = vec![
            product(business.id, Some(x.id), "p1", 0),
            product(business.id, Some(x.id), "p2", 1),
            product(business.id, Some(y.id), "p3", 0),
        ];
        Self {
            business,
            categories: vec![x, y],
            products,
        }
    }

    /// `X: [p1(0)]` and an empty category
    pub fn with_empty_category() -> Self {
        let business = business();
        let x = category(business.id, "X", 0);
        let empty = category(business.id, "Empty", 1);
        let products = vec![product(business.id, Some(x.id), "p1", 0)];
        Self {
            business,
            categories: vec![x, empty],
            products,
        }
    }
}

#[cfg(test)]
pub fn seeded_store(fixture: &MenuFixture) -> Arc<InMemoryStore> {
    let store = InMemoryStore::new();
    store.seed(Collection::Businesses, vec![to_row(&fixture.business)]);
    store.seed(
        Collection::Categories,
        fixture.categories.iter().map(to_row).collect(),
    );
    store.seed(
        Collection::Products,
        fixture.products.iter().map(to_row).collect(),
    );
    Arc::new(store)
}

/// Reconciler over `store` with the menu already loaded
#[cfg(test)]
pub async fn loaded_reconciler(store: &Arc<InMemoryStore>, business_id: Uuid) -> Arc<Reconciler> {
    let reconciler = Arc::new(Reconciler::new(
        store.clone(),
        business_id,
        PreviewSignal::new(16),
        Duration::from_secs(5),
    ));
    reconciler.load().await.unwrap();
    reconciler
}

#[cfg(test)]
fn to_row<T: serde::Serialize>(record: &T) -> serde_json::Value {
    serde_json::to_value(record).unwrap()
}
