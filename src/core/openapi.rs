use utoipa::{Modify, OpenApi};

use crate::features::business::{dtos as business_dtos, handlers as business_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::ordering::drag;
use crate::features::preview::{dtos as preview_dtos, handlers as preview_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::{business, categories, products};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Dashboard
        dashboard_handlers::get_dashboard,
        dashboard_handlers::reload_dashboard,
        dashboard_handlers::categories_drag_end,
        dashboard_handlers::categories_gesture,
        dashboard_handlers::move_category,
        dashboard_handlers::set_category_availability,
        dashboard_handlers::products_drag_end,
        dashboard_handlers::products_gesture,
        dashboard_handlers::move_product,
        dashboard_handlers::set_product_availability,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        categories_handlers::upload_category_image,
        // Products
        products_handlers::list_products,
        products_handlers::get_product,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::delete_product,
        products_handlers::upload_product_image,
        // Business settings
        business_handlers::get_business,
        business_handlers::update_business,
        business_handlers::upload_cover,
        // Preview (public)
        preview_handlers::preview_events,
        preview_handlers::get_public_menu,
    ),
    components(
        schemas(
            Meta,
            // Records
            categories::models::Category,
            categories::models::NamePosition,
            products::models::Product,
            business::models::Business,
            // Catalog forms
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            products_dtos::CreateProductDto,
            products_dtos::UpdateProductDto,
            business_dtos::UpdateBusinessDto,
            // Dashboard and ordering
            dashboard_dtos::DashboardTab,
            dashboard_dtos::DashboardDto,
            dashboard_dtos::CategoryProductsDto,
            dashboard_dtos::OutcomeDto,
            dashboard_dtos::ReconcileResultDto,
            dashboard_dtos::DropTargetDto,
            dashboard_dtos::DragEndDto,
            dashboard_dtos::DroppableDto,
            dashboard_dtos::GestureEventDto,
            dashboard_dtos::GestureDto,
            dashboard_dtos::MoveStepDto,
            dashboard_dtos::AvailabilityDto,
            drag::Direction,
            drag::Point,
            drag::Rect,
            // Preview
            preview_dtos::PublicMenuDto,
            preview_dtos::PublicCategoryDto,
            preview_dtos::PublicProductDto,
            ApiResponse<dashboard_dtos::DashboardDto>,
            ApiResponse<dashboard_dtos::ReconcileResultDto>,
            ApiResponse<Vec<categories::models::Category>>,
            ApiResponse<categories::models::Category>,
            ApiResponse<Vec<products::models::Product>>,
            ApiResponse<products::models::Product>,
            ApiResponse<business::models::Business>,
            ApiResponse<preview_dtos::PublicMenuDto>,
        )
    ),
    tags(
        (name = "Dashboard", description = "Admin dashboard: loaded menu, reordering and availability"),
        (name = "categories", description = "Menu category management"),
        (name = "products", description = "Menu product management"),
        (name = "business", description = "Business settings (name, social link, cover)"),
        (name = "preview", description = "Live preview signal and public menu (public)"),
    ),
    info(
        title = "Menu Admin API",
        version = "0.1.0",
        description = "Admin backend for a restaurant's digital menu",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_ordering_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/admin/products/drag-end"));
        assert!(doc.paths.paths.contains_key("/api/admin/categories/{id}/move"));
        assert!(doc.paths.paths.contains_key("/api/preview/events"));
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Kedai Admin".to_string(),
            version: "1.2.3".to_string(),
            description: "docs".to_string(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "Kedai Admin");
        assert_eq!(doc.info.version, "1.2.3");
    }
}
