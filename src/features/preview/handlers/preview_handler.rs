use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive},
        Sse,
    },
    Json,
};
use futures::Stream;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::core::error::Result;
use crate::features::preview::dtos::PublicMenuDto;
use crate::features::preview::services::{PreviewMessage, PreviewRefresher, PreviewSignal};
use crate::shared::constants::PREVIEW_EVENT_NAME;
use crate::shared::types::ApiResponse;

/// State shared by the preview handlers
#[derive(Clone)]
pub struct PreviewState {
    pub signal: PreviewSignal,
    pub refresher: Arc<PreviewRefresher>,
    pub keepalive: Duration,
}

/// Subscribe to preview refresh signals
///
/// Emits one `refresh-preview` event per signal.
#[utoipa::path(
    get,
    path = "/api/preview/events",
    responses(
        (status = 200, description = "SSE stream of refresh signals", content_type = "text/event-stream"),
    ),
    tag = "preview"
)]
pub async fn preview_events(
    State(state): State<PreviewState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    tracing::debug!("Preview surface subscribed");

    // A lagged receiver missed signals, which still means "refresh"
    let stream = BroadcastStream::new(state.signal.subscribe()).map(|_| {
        Ok::<_, Infallible>(
            Event::default()
                .event(PREVIEW_EVENT_NAME)
                .data(PreviewMessage::Refresh.as_str()),
        )
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(state.keepalive).text("ping"))
}

/// Public menu as currently shown in the preview
#[utoipa::path(
    get,
    path = "/api/menu",
    responses(
        (status = 200, description = "Public menu", body = ApiResponse<PublicMenuDto>),
        (status = 502, description = "Backend unavailable")
    ),
    tag = "preview"
)]
pub async fn get_public_menu(
    State(state): State<PreviewState>,
) -> Result<Json<ApiResponse<PublicMenuDto>>> {
    let menu = match state.refresher.latest().await {
        Some(menu) => menu,
        None => state.refresher.fetch_now().await?,
    };
    Ok(Json(ApiResponse::success(Some((*menu).clone()), None, None)))
}
