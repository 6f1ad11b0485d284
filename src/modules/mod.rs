//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for the hosted backend: the remote data
//! store (REST data API) and object storage for uploaded images.

pub mod storage;
pub mod store;
