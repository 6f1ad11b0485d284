use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Create admin dashboard routes
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        // Loaded data
        .route("/api/admin/dashboard", get(handlers::get_dashboard))
        .route("/api/admin/dashboard/reload", post(handlers::reload_dashboard))
        // Category ordering
        .route(
            "/api/admin/categories/drag-end",
            post(handlers::categories_drag_end),
        )
        .route(
            "/api/admin/categories/gesture",
            post(handlers::categories_gesture),
        )
        .route("/api/admin/categories/{id}/move", post(handlers::move_category))
        .route(
            "/api/admin/categories/{id}/availability",
            patch(handlers::set_category_availability),
        )
        // Product ordering
        .route(
            "/api/admin/products/drag-end",
            post(handlers::products_drag_end),
        )
        .route("/api/admin/products/gesture", post(handlers::products_gesture))
        .route("/api/admin/products/{id}/move", post(handlers::move_product))
        .route(
            "/api/admin/products/{id}/availability",
            patch(handlers::set_product_availability),
        )
        .with_state(dashboard_service)
}
