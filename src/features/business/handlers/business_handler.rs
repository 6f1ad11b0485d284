use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::business::dtos::UpdateBusinessDto;
use crate::features::business::models::Business;
use crate::features::business::services::BusinessService;
use crate::shared::types::ApiResponse;
use crate::shared::upload::read_image_upload;

/// Get the business settings
#[utoipa::path(
    get,
    path = "/api/admin/business",
    responses(
        (status = 200, description = "Business settings", body = ApiResponse<Business>),
    ),
    tag = "business"
)]
pub async fn get_business(
    State(service): State<Arc<BusinessService>>,
) -> Result<Json<ApiResponse<Business>>> {
    let business = service.get().await?;
    Ok(Json(ApiResponse::success(Some(business), None, None)))
}

/// Update display name and social link
#[utoipa::path(
    patch,
    path = "/api/admin/business",
    request_body = UpdateBusinessDto,
    responses(
        (status = 200, description = "Settings updated", body = ApiResponse<Business>),
        (status = 400, description = "Validation error")
    ),
    tag = "business"
)]
pub async fn update_business(
    State(service): State<Arc<BusinessService>>,
    ValidatedJson(dto): ValidatedJson<UpdateBusinessDto>,
) -> Result<Json<ApiResponse<Business>>> {
    let business = service.update(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(business),
        Some("Settings saved".to_string()),
        None,
    )))
}

/// Upload a new cover image (multipart `file` field)
#[utoipa::path(
    post,
    path = "/api/admin/business/cover",
    request_body(content_type = "multipart/form-data", description = "Image in a `file` field"),
    responses(
        (status = 200, description = "Cover stored", body = ApiResponse<Business>),
        (status = 400, description = "Missing or unsupported file")
    ),
    tag = "business"
)]
pub async fn upload_cover(
    State(service): State<Arc<BusinessService>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Business>>> {
    let upload = read_image_upload(multipart).await?;
    let business = service.upload_cover(upload).await?;
    Ok(Json(ApiResponse::success(Some(business), None, None)))
}
