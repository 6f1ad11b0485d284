use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::store::{Collection, Record};

/// Where the category name is overlaid on its cover image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NamePosition {
    TopLeft,
    TopCenter,
    TopRight,
    Center,
    #[default]
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Remote record for a menu category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub is_available: bool,
    #[serde(default)]
    pub name_position: NamePosition,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Category {
    const COLLECTION: Collection = Collection::Categories;

    fn id(&self) -> Uuid {
        self.id
    }
}
