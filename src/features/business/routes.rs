use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::business::handlers;
use crate::features::business::services::BusinessService;
use crate::shared::constants::MAX_UPLOAD_BODY_SIZE;

/// Create routes for the settings tab
pub fn routes(service: Arc<BusinessService>) -> Router {
    Router::new()
        .route(
            "/api/admin/business",
            get(handlers::get_business).patch(handlers::update_business),
        )
        .route(
            "/api/admin/business/cover",
            post(handlers::upload_cover).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_SIZE)),
        )
        .with_state(service)
}
