//! REST data API client
//!
//! Talks to a PostgREST-compatible endpoint at `{BACKEND_URL}/rest/v1`.
//! Filters are encoded as `field=eq.value`, by-id operations as `id=eq.{id}`.

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::{Collection, Query, RemoteStore, StoreError};
use crate::core::config::BackendConfig;
use crate::shared::constants::FIELD_ID;

/// Remote store backed by the hosted backend's REST data API
pub struct RestStore {
    client: Client,
    rest_url: String,
    api_key: String,
    access_token: String,
}

impl RestStore {
    pub fn new(config: &BackendConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| StoreError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", config.url),
            api_key: config.api_key.clone(),
            access_token: config.access_token.clone(),
        })
    }

    fn request(&self, method: Method, collection: Collection) -> RequestBuilder {
        let url = format!("{}/{}", self.rest_url, collection.table_name());
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.access_token))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, StoreError> {
        let response = builder.send().await.map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected { status, message });
        }

        Ok(response)
    }

    async fn read_rows(response: Response) -> Result<Vec<Value>, StoreError> {
        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

fn map_transport_error(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout(e.to_string())
    } else {
        StoreError::Transport(e.to_string())
    }
}

fn id_filter(id: Uuid) -> [(&'static str, String); 1] {
    [(FIELD_ID, format!("eq.{}", id))]
}

/// Total from a `Content-Range` header such as `0-9/42` or `*/0`
pub fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit('/').next()?.trim().parse().ok()
}

#[async_trait]
impl RemoteStore for RestStore {
    async fn select_all(
        &self,
        collection: Collection,
        query: &Query,
    ) -> Result<Vec<Value>, StoreError> {
        debug!("Selecting {} with {:?}", collection, query);

        let builder = self
            .request(Method::GET, collection)
            .query(&[("select", "*")])
            .query(&query.to_params());

        let response = self.send(builder).await?;
        Self::read_rows(response).await
    }

    async fn select_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<Value>, StoreError> {
        let builder = self
            .request(Method::GET, collection)
            .query(&[("select", "*")])
            .query(&id_filter(id));

        let response = self.send(builder).await?;
        Ok(Self::read_rows(response).await?.into_iter().next())
    }

    async fn insert(&self, collection: Collection, record: Value) -> Result<Value, StoreError> {
        let builder = self
            .request(Method::POST, collection)
            .header("Prefer", "return=representation")
            .json(&record);

        let response = self.send(builder).await?;
        Self::read_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode(format!("insert into {} returned no row", collection)))
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: Uuid,
        patch: Value,
    ) -> Result<(), StoreError> {
        debug!("Updating {} record {}: {}", collection, id, patch);

        let builder = self
            .request(Method::PATCH, collection)
            .header("Prefer", "return=minimal")
            .query(&id_filter(id))
            .json(&patch);

        self.send(builder).await?;
        Ok(())
    }

    async fn delete_by_id(&self, collection: Collection, id: Uuid) -> Result<(), StoreError> {
        let builder = self
            .request(Method::DELETE, collection)
            .query(&id_filter(id));

        self.send(builder).await?;
        Ok(())
    }

    async fn count(&self, collection: Collection, query: &Query) -> Result<u64, StoreError> {
        let builder = self
            .request(Method::HEAD, collection)
            .header("Prefer", "count=exact")
            .query(&[("select", FIELD_ID)])
            .query(&query.to_params());

        let response = self.send(builder).await?;
        response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| {
                StoreError::Decode(format!("count on {} returned no Content-Range", collection))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("0-9/42"), Some(42));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-9/*"), None);
    }

    #[test]
    fn test_id_filter() {
        let id = Uuid::nil();
        assert_eq!(id_filter(id)[0].1, format!("eq.{}", id));
    }
}
