use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::{Collection, Query, RemoteStore, StoreError};

/// A record type living in one remote collection
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;

    fn id(&self) -> Uuid;
}

/// Typed view over a [`RemoteStore`] collection
pub struct Repository<T> {
    store: Arc<dyn RemoteStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _marker: PhantomData,
        }
    }
}

impl<T: Record> Repository<T> {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub fn store(&self) -> &Arc<dyn RemoteStore> {
        &self.store
    }

    pub async fn list(&self, query: &Query) -> Result<Vec<T>, StoreError> {
        self.store
            .select_all(T::COLLECTION, query)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        self.store
            .select_by_id(T::COLLECTION, id)
            .await?
            .map(decode)
            .transpose()
    }

    /// Like [`find`](Self::find) but absent records are a `NotFound` error
    pub async fn get(&self, id: Uuid) -> Result<T, StoreError> {
        self.find(id).await?.ok_or_else(|| {
            StoreError::NotFound(format!("{} record '{}' not found", T::COLLECTION, id))
        })
    }

    pub async fn insert<N: Serialize>(&self, record: &N) -> Result<T, StoreError> {
        let created = self.store.insert(T::COLLECTION, encode(record)?).await?;
        decode(created)
    }

    pub async fn update<P: Serialize>(&self, id: Uuid, patch: &P) -> Result<(), StoreError> {
        self.store
            .update_by_id(T::COLLECTION, id, encode(patch)?)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.store.delete_by_id(T::COLLECTION, id).await
    }

    pub async fn count(&self, query: &Query) -> Result<u64, StoreError> {
        self.store.count(T::COLLECTION, query).await
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|e| StoreError::Decode(e.to_string()))
}

fn encode<T: Serialize>(value: &T) -> Result<Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::Decode(e.to_string()))
}
