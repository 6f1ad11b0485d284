use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::ordering::Reconciler;
use crate::features::products::dtos::{
    CreateProductDto, NewProduct, ProductPatch, UpdateProductDto,
};
use crate::features::products::models::Product;
use crate::modules::storage::{AssetBucket, ObjectStorage};
use crate::modules::store::{Query, Repository};
use crate::shared::constants::{
    FIELD_BUSINESS_ID, FIELD_CATEGORY_ID, FIELD_DISPLAY_ORDER, FIELD_IMAGE_URL,
};
use crate::shared::upload::ImageUpload;

/// Service for product operations
pub struct ProductService {
    business_id: Uuid,
    products: Repository<Product>,
    categories: Repository<Category>,
    storage: Arc<dyn ObjectStorage>,
    reconciler: Arc<Reconciler>,
}

impl ProductService {
    pub fn new(reconciler: Arc<Reconciler>, storage: Arc<dyn ObjectStorage>) -> Self {
        let store = Arc::clone(reconciler.store());
        Self {
            business_id: reconciler.business_id(),
            products: Repository::new(Arc::clone(&store)),
            categories: Repository::new(store),
            storage,
            reconciler,
        }
    }

    fn scoped(&self) -> Query {
        Query::new().eq(FIELD_BUSINESS_ID, self.business_id.to_string())
    }

    fn category_scope(&self, category_id: Uuid) -> Query {
        self.scoped().eq(FIELD_CATEGORY_ID, category_id.to_string())
    }

    /// Products of the business in display order, optionally for one category
    pub async fn list(&self, category_id: Option<Uuid>) -> Result<Vec<Product>> {
        let query = match category_id {
            Some(category_id) => self.category_scope(category_id),
            None => self.scoped(),
        };
        Ok(self
            .products
            .list(&query.order_asc(FIELD_DISPLAY_ORDER))
            .await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Product> {
        self.products
            .find(id)
            .await?
            .filter(|p| p.business_id == self.business_id)
            .ok_or_else(|| AppError::NotFound(format!("Product '{}' not found", id)))
    }

    async fn ensure_category(&self, category_id: Uuid) -> Result<()> {
        self.categories
            .find(category_id)
            .await?
            .filter(|c| c.business_id == self.business_id)
            .map(|_| ())
            .ok_or_else(|| AppError::BadRequest(format!("Category '{}' does not exist", category_id)))
    }

    /// Next free display order within a category
    async fn next_order_in(&self, category_id: Uuid) -> Result<i32> {
        Ok(self.products.count(&self.category_scope(category_id)).await? as i32)
    }

    /// Create a product at the end of its category
    pub async fn create(&self, dto: CreateProductDto) -> Result<Product> {
        let category_id = dto.category_id;
        self.ensure_category(category_id).await?;

        // Counted under the gate so an in-flight move cannot change the scope
        let product = self
            .reconciler
            .mutate(|| async move {
                let record = NewProduct {
                    business_id: self.business_id,
                    category_id,
                    name: dto.name.trim().to_string(),
                    description: dto.description,
                    price: dto.price,
                    is_available: dto.is_available,
                    display_order: self.next_order_in(category_id).await?,
                };

                self.products.insert(&record).await.map_err(|e| {
                    tracing::error!("Failed to create product: {:?}", e);
                    AppError::from(e)
                })
            })
            .await?;

        tracing::info!(
            "Created product {} ({}) in category {}",
            product.id,
            product.name,
            category_id
        );
        Ok(product)
    }

    pub async fn update(&self, id: Uuid, dto: UpdateProductDto) -> Result<Product> {
        self.reconciler
            .mutate(|| async move {
                let existing = self.get(id).await?;

                let mut patch = ProductPatch {
                    name: dto.name.map(|n| n.trim().to_string()),
                    description: dto.description,
                    price: dto.price,
                    is_available: dto.is_available,
                    ..Default::default()
                };

                if let Some(category_id) =
                    dto.category_id.filter(|c| Some(*c) != existing.category_id)
                {
                    self.ensure_category(category_id).await?;
                    patch.category_id = Some(category_id);
                    patch.display_order = Some(self.next_order_in(category_id).await?);
                    tracing::info!("Moving product {} to category {}", id, category_id);
                }

                Ok::<_, AppError>(self.products.update(id, &patch).await?)
            })
            .await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.reconciler
            .mutate(|| async move {
                self.get(id).await?;
                Ok::<_, AppError>(self.products.delete(id).await?)
            })
            .await?;

        tracing::info!("Deleted product {}", id);
        Ok(())
    }

    pub async fn upload_image(&self, id: Uuid, upload: ImageUpload) -> Result<Product> {
        self.get(id).await?;

        let path = upload.record_path(id);
        let stored = self
            .storage
            .upload(
                AssetBucket::ProductImages,
                &path,
                upload.data,
                &upload.content_type,
                false,
            )
            .await?;
        let url = self.storage.public_url(AssetBucket::ProductImages, &stored);

        self.reconciler
            .mutate(|| async move {
                Ok::<_, AppError>(
                    self.products
                        .update(id, &json!({ FIELD_IMAGE_URL: url }))
                        .await?,
                )
            })
            .await?;

        self.get(id).await
    }
}
