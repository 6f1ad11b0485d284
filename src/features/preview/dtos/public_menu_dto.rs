use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::business::models::Business;
use crate::features::categories::models::{Category, NamePosition};
use crate::features::products::models::Product;

/// Read-only menu as shown to guests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublicMenuDto {
    pub business_id: Uuid,
    pub business_name: String,
    pub cover_image_url: Option<String>,
    pub instagram_url: Option<String>,
    pub categories: Vec<PublicCategoryDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublicCategoryDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub name_position: NamePosition,
    pub image_url: Option<String>,
    pub products: Vec<PublicProductDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublicProductDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub image_url: Option<String>,
}

impl From<Product> for PublicProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            image_url: p.image_url,
        }
    }
}

impl PublicMenuDto {
    /// Assemble the menu from available categories and products, both already
    /// in display order. Categories without products are kept.
    pub fn build(business: Business, categories: Vec<Category>, products: Vec<Product>) -> Self {
        let mut categories: Vec<PublicCategoryDto> = categories
            .into_iter()
            .map(|c| PublicCategoryDto {
                id: c.id,
                name: c.name,
                description: c.description,
                name_position: c.name_position,
                image_url: c.image_url,
                products: Vec::new(),
            })
            .collect();

        for product in products {
            let owner = product
                .category_id
                .and_then(|id| categories.iter_mut().find(|c| c.id == id));
            if let Some(category) = owner {
                category.products.push(product.into());
            }
        }

        Self {
            business_id: business.id,
            business_name: business.name,
            cover_image_url: business.cover_image_url,
            instagram_url: business.instagram_url,
            categories,
        }
    }
}
