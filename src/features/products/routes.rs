use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;
use crate::shared::constants::MAX_UPLOAD_BODY_SIZE;

/// Create routes for product management
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/api/admin/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/api/admin/products/{id}",
            get(handlers::get_product)
                .patch(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route(
            "/api/admin/products/{id}/image",
            post(handlers::upload_product_image)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_SIZE)),
        )
        .with_state(service)
}
