//! Remote data store interface
//!
//! All persistence is delegated to the hosted backend. Collections are
//! reached through [`RemoteStore`], a JSON-record query/update interface;
//! [`Repository`] layers typed decoding on top of it.

#[cfg(test)]
pub mod memory;
pub mod query;
pub mod repository;
pub mod rest_store;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

pub use query::Query;
pub use repository::{Record, Repository};
pub use rest_store::RestStore;

/// Record collections owned by a business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Categories,
    Products,
    Businesses,
    BusinessMembers,
}

impl Collection {
    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Categories => "categories",
            Collection::Products => "products",
            Collection::Businesses => "businesses",
            Collection::BusinessMembers => "business_members",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("failed to decode record: {0}")]
    Decode(String),

    #[error("request timed out: {0}")]
    Timeout(String),
}

/// Query/update interface over the backend's record collections
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn select_all(&self, collection: Collection, query: &Query)
        -> Result<Vec<Value>, StoreError>;

    async fn select_by_id(&self, collection: Collection, id: Uuid)
        -> Result<Option<Value>, StoreError>;

    /// Insert a record and return it as stored (server-assigned id included)
    async fn insert(&self, collection: Collection, record: Value) -> Result<Value, StoreError>;

    async fn update_by_id(
        &self,
        collection: Collection,
        id: Uuid,
        patch: Value,
    ) -> Result<(), StoreError>;

    async fn delete_by_id(&self, collection: Collection, id: Uuid) -> Result<(), StoreError>;

    async fn count(&self, collection: Collection, query: &Query) -> Result<u64, StoreError>;
}
