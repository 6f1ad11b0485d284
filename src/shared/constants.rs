/// Wire form of the preview refresh message
pub const PREVIEW_REFRESH_SENTINEL: &str = "refresh-preview";

/// SSE event name used for preview refresh messages
pub const PREVIEW_EVENT_NAME: &str = "preview";

/// Maximum accepted image upload size
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024; // 5MB

/// Body limit for multipart image uploads (room for multipart overhead)
pub const MAX_UPLOAD_BODY_SIZE: usize = 6 * 1024 * 1024; // 6MB

/// Image MIME types accepted for category, product and cover uploads
pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

// =============================================================================
// COLLECTION FIELDS
// =============================================================================

pub const FIELD_ID: &str = "id";
pub const FIELD_BUSINESS_ID: &str = "business_id";
pub const FIELD_CATEGORY_ID: &str = "category_id";
pub const FIELD_DISPLAY_ORDER: &str = "display_order";
pub const FIELD_IS_AVAILABLE: &str = "is_available";
pub const FIELD_IMAGE_URL: &str = "image_url";
pub const FIELD_USER_ID: &str = "user_id";
