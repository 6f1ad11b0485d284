//! Object storage client
//!
//! Uploads go to `POST {base}/object/{bucket}/{path}`; public files are
//! served from `{base}/object/public/{bucket}/{path}`.

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, info};

use super::{AssetBucket, ObjectStorage, StorageError};
use crate::core::config::{BackendConfig, StorageConfig};

pub struct StorageClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    access_token: String,
    category_images_bucket: String,
    product_images_bucket: String,
    cover_images_bucket: String,
}

impl StorageClient {
    pub fn new(config: &StorageConfig, backend: &BackendConfig) -> Result<Self, StorageError> {
        let http_client = Client::builder()
            .timeout(backend.request_timeout)
            .build()
            .map_err(|e| StorageError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        info!("Object storage client initialized for {}", config.base_url);

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: backend.api_key.clone(),
            access_token: backend.access_token.clone(),
            category_images_bucket: config.category_images_bucket.clone(),
            product_images_bucket: config.product_images_bucket.clone(),
            cover_images_bucket: config.cover_images_bucket.clone(),
        })
    }

    pub fn bucket_name(&self, bucket: AssetBucket) -> &str {
        match bucket {
            AssetBucket::CategoryImages => &self.category_images_bucket,
            AssetBucket::ProductImages => &self.product_images_bucket,
            AssetBucket::CoverImages => &self.cover_images_bucket,
        }
    }
}

/// Percent-encode each path segment, keeping the separators
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl ObjectStorage for StorageClient {
    async fn upload(
        &self,
        bucket: AssetBucket,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> Result<String, StorageError> {
        let url = format!(
            "{}/object/{}/{}",
            self.base_url,
            self.bucket_name(bucket),
            encode_path(path)
        );

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.access_token))
            .header(header::CONTENT_TYPE, content_type)
            .header("x-upsert", if overwrite { "true" } else { "false" })
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected { status, message });
        }

        debug!("Uploaded '{}' to bucket '{}'", path, self.bucket_name(bucket));
        Ok(path.to_string())
    }

    fn public_url(&self, bucket: AssetBucket, path: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.base_url,
            self.bucket_name(bucket),
            encode_path(path)
        )
    }
}
