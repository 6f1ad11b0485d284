use std::env;
use std::time::Duration;

use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub backend: BackendConfig,
    pub storage: StorageConfig,
    pub session: SessionConfig,
    pub ordering: OrderingConfig,
    pub preview: PreviewConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Hosted backend (REST data API) connection settings
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the hosted backend, without trailing slash
    pub url: String,
    /// Project API key sent as `apikey` header
    pub api_key: String,
    /// Bearer token for row-level authorization (defaults to the API key)
    pub access_token: String,
    pub request_timeout: Duration,
}

/// Object storage settings for uploaded images
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage API base, e.g. `https://xyz.example.co/storage/v1`
    pub base_url: String,
    pub category_images_bucket: String,
    pub product_images_bucket: String,
    pub cover_images_bucket: String,
}

/// How the owning business of this admin session is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionConfig {
    /// Business id given explicitly
    Business(Uuid),
    /// Business resolved from the membership record of this user
    Member(Uuid),
}

#[derive(Debug, Clone)]
pub struct OrderingConfig {
    /// Upper bound for a whole reconciliation write batch
    pub reconcile_timeout: Duration,
    pub touch_activation_delay: Duration,
    pub touch_activation_tolerance: f64,
    pub pointer_activation_distance: f64,
}

#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub channel_capacity: usize,
    pub keepalive: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        let backend = BackendConfig::from_env()?;
        let storage = StorageConfig::from_env(&backend.url);

        Ok(Config {
            app: AppConfig::from_env()?,
            backend,
            storage,
            session: SessionConfig::from_env()?,
            ordering: OrderingConfig::from_env()?,
            preview: PreviewConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl BackendConfig {
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("BACKEND_URL")
            .map_err(|_| "BACKEND_URL environment variable is required".to_string())?
            .trim_end_matches('/')
            .to_string();

        let api_key = env::var("BACKEND_API_KEY")
            .map_err(|_| "BACKEND_API_KEY environment variable is required".to_string())?;

        let access_token = env::var("BACKEND_ACCESS_TOKEN")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| api_key.clone());

        let request_timeout_secs = env::var("BACKEND_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "BACKEND_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            api_key,
            access_token,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

impl StorageConfig {
    pub fn from_env(backend_url: &str) -> Self {
        let base_url = format!("{}/storage/v1", backend_url.trim_end_matches('/'));

        Self {
            base_url,
            category_images_bucket: env::var("CATEGORY_IMAGES_BUCKET")
                .unwrap_or_else(|_| "category-images".to_string()),
            product_images_bucket: env::var("PRODUCT_IMAGES_BUCKET")
                .unwrap_or_else(|_| "product-images".to_string()),
            cover_images_bucket: env::var("COVER_IMAGES_BUCKET")
                .unwrap_or_else(|_| "cover-images".to_string()),
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, String> {
        let business_id = env::var("BUSINESS_ID").ok().filter(|s| !s.is_empty());
        let admin_user_id = env::var("ADMIN_USER_ID").ok().filter(|s| !s.is_empty());
        Self::from_values(business_id.as_deref(), admin_user_id.as_deref())
    }

    fn from_values(business_id: Option<&str>, admin_user_id: Option<&str>) -> Result<Self, String> {
        match (business_id, admin_user_id) {
            (Some(id), _) => Uuid::parse_str(id)
                .map(SessionConfig::Business)
                .map_err(|e| format!("Invalid BUSINESS_ID: {}", e)),
            (None, Some(id)) => Uuid::parse_str(id)
                .map(SessionConfig::Member)
                .map_err(|e| format!("Invalid ADMIN_USER_ID: {}", e)),
            (None, None) => Err("Either BUSINESS_ID or ADMIN_USER_ID must be set".to_string()),
        }
    }
}

impl OrderingConfig {
    const DEFAULT_RECONCILE_TIMEOUT_SECS: u64 = 10;
    const DEFAULT_TOUCH_DELAY_MS: u64 = 250;
    const DEFAULT_TOUCH_TOLERANCE_PX: f64 = 5.0;
    const DEFAULT_POINTER_DISTANCE_PX: f64 = 0.0;

    pub fn from_env() -> Result<Self, String> {
        let reconcile_timeout_secs = env::var("RECONCILE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_RECONCILE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "RECONCILE_TIMEOUT_SECS must be a valid number".to_string())?;

        let touch_delay_ms = env::var("TOUCH_ACTIVATION_DELAY_MS")
            .unwrap_or_else(|_| Self::DEFAULT_TOUCH_DELAY_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "TOUCH_ACTIVATION_DELAY_MS must be a valid number".to_string())?;

        let touch_activation_tolerance = env::var("TOUCH_ACTIVATION_TOLERANCE_PX")
            .unwrap_or_else(|_| Self::DEFAULT_TOUCH_TOLERANCE_PX.to_string())
            .parse::<f64>()
            .map_err(|_| "TOUCH_ACTIVATION_TOLERANCE_PX must be a valid number".to_string())?;

        let pointer_activation_distance = env::var("POINTER_ACTIVATION_DISTANCE_PX")
            .unwrap_or_else(|_| Self::DEFAULT_POINTER_DISTANCE_PX.to_string())
            .parse::<f64>()
            .map_err(|_| "POINTER_ACTIVATION_DISTANCE_PX must be a valid number".to_string())?;

        Ok(Self {
            reconcile_timeout: Duration::from_secs(reconcile_timeout_secs),
            touch_activation_delay: Duration::from_millis(touch_delay_ms),
            touch_activation_tolerance,
            pointer_activation_distance,
        })
    }
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            reconcile_timeout: Duration::from_secs(Self::DEFAULT_RECONCILE_TIMEOUT_SECS),
            touch_activation_delay: Duration::from_millis(Self::DEFAULT_TOUCH_DELAY_MS),
            touch_activation_tolerance: Self::DEFAULT_TOUCH_TOLERANCE_PX,
            pointer_activation_distance: Self::DEFAULT_POINTER_DISTANCE_PX,
        }
    }
}

impl PreviewConfig {
    const DEFAULT_CHANNEL_CAPACITY: usize = 16;
    const DEFAULT_KEEPALIVE_SECS: u64 = 15;

    pub fn from_env() -> Result<Self, String> {
        let channel_capacity = env::var("PREVIEW_CHANNEL_CAPACITY")
            .unwrap_or_else(|_| Self::DEFAULT_CHANNEL_CAPACITY.to_string())
            .parse::<usize>()
            .map_err(|_| "PREVIEW_CHANNEL_CAPACITY must be a valid number".to_string())?;

        if channel_capacity == 0 {
            return Err("PREVIEW_CHANNEL_CAPACITY must be greater than zero".to_string());
        }

        let keepalive_secs = env::var("PREVIEW_KEEPALIVE_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_KEEPALIVE_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "PREVIEW_KEEPALIVE_SECS must be a valid number".to_string())?;

        Ok(Self {
            channel_capacity,
            keepalive: Duration::from_secs(keepalive_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Menu Admin API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Admin API for the digital restaurant menu".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_prefers_explicit_business_id() {
        let business = "6c1a3a52-5f0e-4d57-9a4e-1d8b0f3b8b11";
        let user = "0b7e3c9e-0a51-4a8a-b5f1-6e2f8f1d2c33";

        let session = SessionConfig::from_values(Some(business), Some(user)).unwrap();
        assert_eq!(
            session,
            SessionConfig::Business(Uuid::parse_str(business).unwrap())
        );
    }

    #[test]
    fn test_session_falls_back_to_member_lookup() {
        let user = "0b7e3c9e-0a51-4a8a-b5f1-6e2f8f1d2c33";
        let session = SessionConfig::from_values(None, Some(user)).unwrap();
        assert_eq!(session, SessionConfig::Member(Uuid::parse_str(user).unwrap()));
    }

    #[test]
    fn test_session_requires_some_scope() {
        assert!(SessionConfig::from_values(None, None).is_err());
        assert!(SessionConfig::from_values(Some("not-a-uuid"), None).is_err());
    }

    #[test]
    fn test_storage_base_url_derived_from_backend() {
        let storage = StorageConfig::from_env("https://menu.example.co/");
        assert_eq!(storage.base_url, "https://menu.example.co/storage/v1");
    }

    #[test]
    fn test_swagger_credentials() {
        let swagger = SwaggerConfig {
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert_eq!(swagger.credentials().as_deref(), Some("admin:secret"));
    }
}
