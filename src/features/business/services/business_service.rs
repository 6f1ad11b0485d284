use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::business::dtos::UpdateBusinessDto;
use crate::features::business::models::Business;
use crate::features::ordering::Reconciler;
use crate::modules::storage::{AssetBucket, ObjectStorage};
use crate::modules::store::Repository;
use crate::shared::upload::ImageUpload;

/// Business settings (display name, social link, cover image)
pub struct BusinessService {
    business_id: Uuid,
    businesses: Repository<Business>,
    storage: Arc<dyn ObjectStorage>,
    reconciler: Arc<Reconciler>,
}

impl BusinessService {
    pub fn new(reconciler: Arc<Reconciler>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self {
            business_id: reconciler.business_id(),
            businesses: Repository::new(Arc::clone(reconciler.store())),
            storage,
            reconciler,
        }
    }

    pub async fn get(&self) -> Result<Business> {
        self.businesses
            .find(self.business_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Business '{}' not found", self.business_id)))
    }

    pub async fn update(&self, dto: UpdateBusinessDto) -> Result<Business> {
        let patch = UpdateBusinessDto {
            name: dto.name.map(|n| n.trim().to_string()),
            ..dto
        };
        self.reconciler
            .mutate(|| async move {
                Ok::<_, AppError>(self.businesses.update(self.business_id, &patch).await?)
            })
            .await?;

        tracing::info!("Updated settings of business {}", self.business_id);
        self.get().await
    }

    /// Replace the cover image. One path per upload time, overwriting allowed.
    pub async fn upload_cover(&self, upload: ImageUpload) -> Result<Business> {
        let path = format!(
            "{}/{}",
            self.business_id,
            chrono::Utc::now().timestamp_millis()
        );
        let stored = self
            .storage
            .upload(
                AssetBucket::CoverImages,
                &path,
                upload.data,
                &upload.content_type,
                true,
            )
            .await?;
        let url = self.storage.public_url(AssetBucket::CoverImages, &stored);

        self.reconciler
            .mutate(|| async move {
                Ok::<_, AppError>(
                    self.businesses
                        .update(self.business_id, &json!({ "cover_image_url": url }))
                        .await?,
                )
            })
            .await?;

        tracing::info!("Stored cover image for business {}", self.business_id);
        self.get().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::preview::PreviewMessage;
    use crate::modules::storage::memory::InMemoryStorage;
    use crate::modules::storage::StorageError;
    use crate::shared::test_helpers::{loaded_reconciler, seeded_store, MenuFixture};

    async fn service(fixture: &MenuFixture) -> (BusinessService, Arc<InMemoryStorage>, Arc<Reconciler>) {
        let store = seeded_store(fixture);
        let reconciler = loaded_reconciler(&store, fixture.business.id).await;
        let storage = Arc::new(InMemoryStorage::new());
        let service = BusinessService::new(Arc::clone(&reconciler), storage.clone());
        (service, storage, reconciler)
    }

    #[tokio::test]
    async fn test_update_name_and_link() {
        let fixture = MenuFixture::three_categories();
        let (service, _, reconciler) = service(&fixture).await;
        let mut signals = reconciler.signal().subscribe();

        let updated = service
            .update(UpdateBusinessDto {
                name: Some(" Kedai Baru ".to_string()),
                instagram_url: Some("https://instagram.com/kedaibaru".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(updated.name, "Kedai Baru");
        assert_eq!(
            updated.instagram_url.as_deref(),
            Some("https://instagram.com/kedaibaru")
        );
        assert_eq!(reconciler.snapshot().await.unwrap().business.name, "Kedai Baru");
        assert_eq!(signals.try_recv().unwrap(), PreviewMessage::Refresh);
    }

    #[tokio::test]
    async fn test_cover_upload_overwrites_under_business_path() {
        let fixture = MenuFixture::three_categories();
        let (service, storage, _) = service(&fixture).await;
        let upload = ImageUpload::from_parts(vec![1, 2], "image/png").unwrap();

        let updated = service.upload_cover(upload).await.unwrap();

        let objects = storage.objects();
        assert_eq!(objects[0].bucket, AssetBucket::CoverImages);
        assert!(objects[0].overwrite);
        assert!(objects[0]
            .path
            .starts_with(&format!("{}/", fixture.business.id)));
        assert!(updated.cover_image_url.unwrap().contains(&objects[0].path));
    }

    #[tokio::test]
    async fn test_rejected_cover_upload_leaves_business_untouched() {
        let fixture = MenuFixture::three_categories();
        let (service, storage, _) = service(&fixture).await;
        storage.set_reject_uploads(true);
        let upload = ImageUpload::from_parts(vec![1], "image/gif").unwrap();

        let result = service.upload_cover(upload).await;

        assert!(matches!(
            result,
            Err(AppError::Storage(StorageError::Rejected { .. }))
        ));
        assert!(service.get().await.unwrap().cover_image_url.is_none());
    }
}
