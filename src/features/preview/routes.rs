use axum::{routing::get, Router};

use crate::features::preview::handlers::{self, PreviewState};

/// Create routes for the preview feature
///
/// Note: This feature is public (the preview frame has no admin session)
pub fn routes(state: PreviewState) -> Router {
    Router::new()
        .route("/api/preview/events", get(handlers::preview_events))
        .route("/api/menu", get(handlers::get_public_menu))
        .with_state(state)
}
