use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CreateCategoryDto, NewCategory, UpdateCategoryDto};
use crate::features::categories::models::Category;
use crate::features::ordering::Reconciler;
use crate::modules::storage::{AssetBucket, ObjectStorage};
use crate::modules::store::{Query, Repository};
use crate::shared::constants::{FIELD_BUSINESS_ID, FIELD_DISPLAY_ORDER, FIELD_IMAGE_URL};
use crate::shared::upload::ImageUpload;

/// Service for category operations
pub struct CategoryService {
    business_id: Uuid,
    categories: Repository<Category>,
    storage: Arc<dyn ObjectStorage>,
    reconciler: Arc<Reconciler>,
}

impl CategoryService {
    pub fn new(reconciler: Arc<Reconciler>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self {
            business_id: reconciler.business_id(),
            categories: Repository::new(Arc::clone(reconciler.store())),
            storage,
            reconciler,
        }
    }

    fn scoped(&self) -> Query {
        Query::new().eq(FIELD_BUSINESS_ID, self.business_id.to_string())
    }

    /// List the business's categories in display order
    pub async fn list(&self) -> Result<Vec<Category>> {
        let query = self.scoped().order_asc(FIELD_DISPLAY_ORDER);
        Ok(self.categories.list(&query).await?)
    }

    /// Get category by id
    pub async fn get(&self, id: Uuid) -> Result<Category> {
        self.categories
            .find(id)
            .await?
            .filter(|c| c.business_id == self.business_id)
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))
    }

    /// Create a category at the end of the list
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<Category> {
        let category = self
            .reconciler
            .mutate(|| async move {
                let display_order = self.categories.count(&self.scoped()).await?;

                let record = NewCategory {
                    business_id: self.business_id,
                    name: dto.name.trim().to_string(),
                    description: dto.description,
                    name_position: dto.name_position,
                    is_available: dto.is_available,
                    display_order: display_order as i32,
                };

                self.categories.insert(&record).await.map_err(|e| {
                    tracing::error!("Failed to create category: {:?}", e);
                    AppError::from(e)
                })
            })
            .await?;

        tracing::info!("Created category {} ({})", category.id, category.name);
        Ok(category)
    }

    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<Category> {
        self.reconciler
            .mutate(|| async move {
                self.get(id).await?;

                let patch = UpdateCategoryDto {
                    name: dto.name.map(|n| n.trim().to_string()),
                    ..dto
                };
                Ok::<_, AppError>(self.categories.update(id, &patch).await?)
            })
            .await?;

        self.get(id).await
    }

    /// Delete a category. Its products keep their (now dangling) category id.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.reconciler
            .mutate(|| async move {
                self.get(id).await?;
                Ok::<_, AppError>(self.categories.delete(id).await?)
            })
            .await?;

        tracing::info!("Deleted category {}", id);
        Ok(())
    }

    pub async fn upload_image(&self, id: Uuid, upload: ImageUpload) -> Result<Category> {
        self.get(id).await?;

        let path = upload.record_path(id);
        let stored = self
            .storage
            .upload(
                AssetBucket::CategoryImages,
                &path,
                upload.data,
                &upload.content_type,
                false,
            )
            .await?;
        let url = self.storage.public_url(AssetBucket::CategoryImages, &stored);

        self.reconciler
            .mutate(|| async move {
                Ok::<_, AppError>(
                    self.categories
                        .update(id, &json!({ FIELD_IMAGE_URL: url }))
                        .await?,
                )
            })
            .await?;

        self.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::NamePosition;
    use crate::features::preview::PreviewMessage;
    use crate::modules::storage::memory::InMemoryStorage;
    use crate::shared::test_helpers::{loaded_reconciler, seeded_store, MenuFixture};

    async fn service(fixture: &MenuFixture) -> (CategoryService, Arc<InMemoryStorage>, Arc<Reconciler>) {
        let store = seeded_store(fixture);
        let reconciler = loaded_reconciler(&store, fixture.business.id).await;
        let storage = Arc::new(InMemoryStorage::new());
        let service = CategoryService::new(Arc::clone(&reconciler), storage.clone());
        (service, storage, reconciler)
    }

    fn create_dto(name: &str) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            description: None,
            name_position: NamePosition::default(),
            is_available: true,
        }
    }

    #[tokio::test]
    async fn test_create_appends_with_count_as_order() {
        let fixture = MenuFixture::three_categories();
        let (service, _, reconciler) = service(&fixture).await;
        let mut signals = reconciler_signal(&reconciler);

        let created = service.create(create_dto("  Desserts ")).await.unwrap();

        assert_eq!(created.display_order, 3);
        assert_eq!(created.name, "Desserts");
        let snapshot = reconciler.snapshot().await.unwrap();
        assert_eq!(snapshot.categories.last().map(|c| c.id), Some(created.id));
        assert_eq!(signals.try_recv().unwrap(), PreviewMessage::Refresh);
    }

    #[tokio::test]
    async fn test_update_keeps_display_order() {
        let fixture = MenuFixture::three_categories();
        let (service, _, _) = service(&fixture).await;
        let b = &fixture.categories[1];

        let updated = service
            .update(
                b.id,
                UpdateCategoryDto {
                    name: Some("Bakes".to_string()),
                    description: None,
                    name_position: Some(NamePosition::Center),
                    is_available: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Bakes");
        assert_eq!(updated.name_position, NamePosition::Center);
        assert_eq!(updated.display_order, 1);
    }

    #[tokio::test]
    async fn test_get_other_business_category_is_not_found() {
        let fixture = MenuFixture::three_categories();
        let (service, _, _) = service(&fixture).await;

        let result = service.get(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_upload_image_stores_public_url() {
        let fixture = MenuFixture::three_categories();
        let (service, storage, _) = service(&fixture).await;
        let a = fixture.categories[0].id;
        let upload = ImageUpload::from_parts(vec![1, 2, 3], "image/png").unwrap();

        let updated = service.upload_image(a, upload).await.unwrap();

        let objects = storage.objects();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].bucket, AssetBucket::CategoryImages);
        assert!(!objects[0].overwrite);
        assert!(updated.image_url.unwrap().ends_with(&objects[0].path));
    }

    fn reconciler_signal(
        reconciler: &Reconciler,
    ) -> tokio::sync::broadcast::Receiver<PreviewMessage> {
        reconciler.signal().subscribe()
    }
}
