use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for the settings tab; absent fields are left as they are
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateBusinessDto {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "crate::shared::validation::validate_not_blank")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(regex(
        path = *crate::shared::validation::SOCIAL_URL_REGEX,
        message = "Instagram link must be a full http(s) URL"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
}
