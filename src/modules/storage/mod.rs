//! Storage module for uploaded images
//!
//! Object storage of the hosted backend. Each asset class has its own
//! bucket; stored paths are later turned into public retrieval URLs.

#[cfg(test)]
pub mod memory;
mod storage_client;

use async_trait::async_trait;
use thiserror::Error;

pub use storage_client::StorageClient;

/// Bucket per asset class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetBucket {
    CategoryImages,
    ProductImages,
    CoverImages,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage transport failure: {0}")]
    Transport(String),

    #[error("upload rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload `data` to `bucket` at `path`, returning the stored path
    async fn upload(
        &self,
        bucket: AssetBucket,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> Result<String, StorageError>;

    /// Public retrieval URL for a stored path
    fn public_url(&self, bucket: AssetBucket, path: &str) -> String;
}
