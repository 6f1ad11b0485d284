use axum::{routing::any, Router};

use crate::features::session::handlers;

/// Routes standing in for the admin surface when the session has no business
pub fn unavailable_routes(reason: String) -> Router {
    Router::new()
        .route("/api/admin/{*path}", any(handlers::session_unavailable))
        .route("/api/menu", any(handlers::session_unavailable))
        .route("/api/preview/events", any(handlers::session_unavailable))
        .with_state(reason)
}
