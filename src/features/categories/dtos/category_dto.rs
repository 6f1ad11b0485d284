use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::NamePosition;

fn default_available() -> bool {
    true
}

/// Request DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "crate::shared::validation::validate_not_blank")
    )]
    pub name: String,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub name_position: NamePosition,

    #[serde(default = "default_available")]
    pub is_available: bool,
}

/// Request DTO for updating a category; absent fields are left as they are.
/// Display order is owned by reordering and cannot be set here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "crate::shared::validation::validate_not_blank")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_position: Option<NamePosition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

/// Record inserted for a new category
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub business_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub name_position: NamePosition,
    pub is_available: bool,
    pub display_order: i32,
}
