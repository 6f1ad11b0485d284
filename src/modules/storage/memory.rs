//! In-process [`ObjectStorage`] for tests

use std::sync::Mutex;

use async_trait::async_trait;

use super::{AssetBucket, ObjectStorage, StorageError};

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bucket: AssetBucket,
    pub path: String,
    pub content_type: String,
    pub overwrite: bool,
    pub size: usize,
}

#[derive(Default)]
pub struct InMemoryStorage {
    objects: Mutex<Vec<StoredObject>>,
    reject_uploads: Mutex<bool>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }

    pub fn set_reject_uploads(&self, reject: bool) {
        *self.reject_uploads.lock().unwrap() = reject;
    }
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn upload(
        &self,
        bucket: AssetBucket,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> Result<String, StorageError> {
        if *self.reject_uploads.lock().unwrap() {
            return Err(StorageError::Rejected {
                status: 400,
                message: "simulated rejection".to_string(),
            });
        }

        self.objects.lock().unwrap().push(StoredObject {
            bucket,
            path: path.to_string(),
            content_type: content_type.to_string(),
            overwrite,
            size: data.len(),
        });
        Ok(path.to_string())
    }

    fn public_url(&self, bucket: AssetBucket, path: &str) -> String {
        format!("https://storage.test/{:?}/{}", bucket, path)
    }
}
