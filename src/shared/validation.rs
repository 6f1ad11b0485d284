use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::shared::constants::ALLOWED_IMAGE_MIME_TYPES;

lazy_static! {
    /// Regex for validating external social links
    /// Must be an absolute http(s) URL without whitespace
    /// - Valid: "https://instagram.com/kebapci", "http://example.com/a?b=c"
    /// - Invalid: "instagram.com/kebapci", "https://", "https://exa mple.com"
    pub static ref SOCIAL_URL_REGEX: Regex =
        Regex::new(r"^https?://[A-Za-z0-9][A-Za-z0-9.-]*(?::\d+)?(?:/\S*)?$").unwrap();
}

/// Validator hook: price must not be negative
pub fn validate_non_negative_price(price: &rust_decimal::Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut err = ValidationError::new("negative_price");
        err.message = Some("price must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// Validator hook: trimmed name must not be empty
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

pub fn is_image_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_MIME_TYPES.contains(&content_type)
}

/// File extension for an accepted image MIME type
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}
