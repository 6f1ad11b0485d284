use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::features::ordering::drag::DragContextKind;
use crate::features::ordering::models::ItemKind;
use crate::shared::types::ApiResponse;

type ReconcileResponse = Result<Json<ApiResponse<ReconcileResultDto>>, AppError>;

fn reconciled(result: ReconcileResultDto) -> Json<ApiResponse<ReconcileResultDto>> {
    let message = (!result.reconciled)
        .then(|| "Changes could not be saved; showing the latest data".to_string());
    Json(ApiResponse::success(Some(result), message, None))
}

// ============================================================================
// Dashboard
// ============================================================================

/// Get the loaded dashboard for a tab
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard data", body = ApiResponse<DashboardDto>),
        (status = 503, description = "Business not resolved or data not loaded")
    )
)]
pub async fn get_dashboard(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardDto>>, AppError> {
    let tab = DashboardTab::parse_or_default(query.tab.as_deref());
    let dashboard = service.dashboard(tab).await?;
    Ok(Json(ApiResponse::success(Some(dashboard), None, None)))
}

/// Refetch everything from the backend
#[utoipa::path(
    post,
    path = "/api/admin/dashboard/reload",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Fresh dashboard data", body = ApiResponse<DashboardDto>),
        (status = 502, description = "Backend unreachable")
    )
)]
pub async fn reload_dashboard(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardDto>>, AppError> {
    let tab = DashboardTab::parse_or_default(query.tab.as_deref());
    let dashboard = service.reload(tab).await?;
    Ok(Json(ApiResponse::success(Some(dashboard), None, None)))
}

// ============================================================================
// Categories
// ============================================================================

/// Apply a resolved category drop
#[utoipa::path(
    post,
    path = "/api/admin/categories/drag-end",
    tag = "Dashboard",
    request_body = DragEndDto,
    responses(
        (status = 200, description = "Drop applied or rolled back", body = ApiResponse<ReconcileResultDto>),
        (status = 503, description = "Data not loaded")
    )
)]
pub async fn categories_drag_end(
    State(service): State<Arc<DashboardService>>,
    AppJson(dto): AppJson<DragEndDto>,
) -> ReconcileResponse {
    let result = service.drag_end(DragContextKind::Categories, dto).await?;
    Ok(reconciled(result))
}

/// Replay a recorded category gesture
#[utoipa::path(
    post,
    path = "/api/admin/categories/gesture",
    tag = "Dashboard",
    request_body = GestureDto,
    responses(
        (status = 200, description = "Gesture applied", body = ApiResponse<ReconcileResultDto>)
    )
)]
pub async fn categories_gesture(
    State(service): State<Arc<DashboardService>>,
    AppJson(dto): AppJson<GestureDto>,
) -> ReconcileResponse {
    let result = service.gesture(DragContextKind::Categories, dto).await?;
    Ok(reconciled(result))
}

/// Move a category one step up or down
#[utoipa::path(
    post,
    path = "/api/admin/categories/{id}/move",
    tag = "Dashboard",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    request_body = MoveStepDto,
    responses(
        (status = 200, description = "Step applied", body = ApiResponse<ReconcileResultDto>),
        (status = 404, description = "Category not found")
    )
)]
pub async fn move_category(
    State(service): State<Arc<DashboardService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<MoveStepDto>,
) -> ReconcileResponse {
    let result = service
        .step(DragContextKind::Categories, id, dto.direction)
        .await?;
    Ok(reconciled(result))
}

#[utoipa::path(
    patch,
    path = "/api/admin/categories/{id}/availability",
    tag = "Dashboard",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    request_body = AvailabilityDto,
    responses(
        (status = 200, description = "Toggle applied", body = ApiResponse<ReconcileResultDto>),
        (status = 404, description = "Category not found")
    )
)]
pub async fn set_category_availability(
    State(service): State<Arc<DashboardService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<AvailabilityDto>,
) -> ReconcileResponse {
    let result = service
        .set_availability(ItemKind::Category, id, dto.is_available)
        .await?;
    Ok(reconciled(result))
}

// ============================================================================
// Products
// ============================================================================

/// Apply a resolved product drop (reorder or move between categories)
#[utoipa::path(
    post,
    path = "/api/admin/products/drag-end",
    tag = "Dashboard",
    request_body = DragEndDto,
    responses(
        (status = 200, description = "Drop applied or rolled back", body = ApiResponse<ReconcileResultDto>),
        (status = 400, description = "Container without category id"),
        (status = 503, description = "Data not loaded")
    )
)]
pub async fn products_drag_end(
    State(service): State<Arc<DashboardService>>,
    AppJson(dto): AppJson<DragEndDto>,
) -> ReconcileResponse {
    let result = service.drag_end(DragContextKind::Products, dto).await?;
    Ok(reconciled(result))
}

/// Replay a recorded product gesture
#[utoipa::path(
    post,
    path = "/api/admin/products/gesture",
    tag = "Dashboard",
    request_body = GestureDto,
    responses(
        (status = 200, description = "Gesture applied", body = ApiResponse<ReconcileResultDto>)
    )
)]
pub async fn products_gesture(
    State(service): State<Arc<DashboardService>>,
    AppJson(dto): AppJson<GestureDto>,
) -> ReconcileResponse {
    let result = service.gesture(DragContextKind::Products, dto).await?;
    Ok(reconciled(result))
}

/// Move a product one slot; steps cross into neighbouring categories
#[utoipa::path(
    post,
    path = "/api/admin/products/{id}/move",
    tag = "Dashboard",
    params(
        ("id" = Uuid, Path, description = "Product id")
    ),
    request_body = MoveStepDto,
    responses(
        (status = 200, description = "Step applied", body = ApiResponse<ReconcileResultDto>),
        (status = 404, description = "Product not found")
    )
)]
pub async fn move_product(
    State(service): State<Arc<DashboardService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<MoveStepDto>,
) -> ReconcileResponse {
    let result = service
        .step(DragContextKind::Products, id, dto.direction)
        .await?;
    Ok(reconciled(result))
}

#[utoipa::path(
    patch,
    path = "/api/admin/products/{id}/availability",
    tag = "Dashboard",
    params(
        ("id" = Uuid, Path, description = "Product id")
    ),
    request_body = AvailabilityDto,
    responses(
        (status = 200, description = "Toggle applied", body = ApiResponse<ReconcileResultDto>),
        (status = 404, description = "Product not found")
    )
)]
pub async fn set_product_availability(
    State(service): State<Arc<DashboardService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<AvailabilityDto>,
) -> ReconcileResponse {
    let result = service
        .set_availability(ItemKind::Product, id, dto.is_available)
        .await?;
    Ok(reconciled(result))
}
