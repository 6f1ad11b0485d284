use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::features::business::models::Business;
use crate::features::categories::models::Category;
use crate::features::preview::dtos::PublicMenuDto;
use crate::features::products::models::Product;
use crate::modules::store::{Query, RemoteStore, Repository, StoreError};
use crate::shared::constants::{FIELD_BUSINESS_ID, FIELD_DISPLAY_ORDER, FIELD_IS_AVAILABLE};

/// Where the preview surface gets its menu from
#[async_trait]
pub trait MenuSource: Send + Sync {
    async fn fetch_menu(&self) -> Result<PublicMenuDto, StoreError>;
}

/// Public menu queries for one business
pub struct MenuService {
    business_id: Uuid,
    businesses: Repository<Business>,
    categories: Repository<Category>,
    products: Repository<Product>,
}

impl MenuService {
    pub fn new(store: Arc<dyn RemoteStore>, business_id: Uuid) -> Self {
        Self {
            business_id,
            businesses: Repository::new(Arc::clone(&store)),
            categories: Repository::new(Arc::clone(&store)),
            products: Repository::new(store),
        }
    }

    /// Business plus available categories, each with its available products
    pub async fn fetch_public_menu(&self) -> Result<PublicMenuDto, StoreError> {
        let available = Query::new()
            .eq(FIELD_BUSINESS_ID, self.business_id.to_string())
            .eq(FIELD_IS_AVAILABLE, true)
            .order_asc(FIELD_DISPLAY_ORDER);

        let (business, categories, products) = tokio::try_join!(
            self.businesses.get(self.business_id),
            self.categories.list(&available),
            self.products.list(&available),
        )?;

        Ok(PublicMenuDto::build(business, categories, products))
    }
}

#[async_trait]
impl MenuSource for MenuService {
    async fn fetch_menu(&self) -> Result<PublicMenuDto, StoreError> {
        self.fetch_public_menu().await
    }
}
