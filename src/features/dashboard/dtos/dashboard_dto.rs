use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::business::models::Business;
use crate::features::categories::models::Category;
use crate::features::ordering::drag::{
    Direction, DragContextKind, DragEnd, DropTarget, Droppable, GestureEvent, Point, Rect, ScopeId,
};
use crate::features::ordering::models::MenuSnapshot;
use crate::features::ordering::{Outcome, Reconciliation};
use crate::features::products::models::Product;

// ============================================================================
// Dashboard view
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTab {
    #[default]
    Products,
    Categories,
    Settings,
}

impl DashboardTab {
    /// Unknown or missing tabs fall back to products
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("categories") => DashboardTab::Categories,
            Some("settings") => DashboardTab::Settings,
            _ => DashboardTab::Products,
        }
    }
}

impl From<DragContextKind> for DashboardTab {
    fn from(kind: DragContextKind) -> Self {
        match kind {
            DragContextKind::Categories => DashboardTab::Categories,
            DragContextKind::Products => DashboardTab::Products,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// `products`, `categories` or `settings`
    pub tab: Option<String>,
}

/// Products of one category in display order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryProductsDto {
    pub category_id: Uuid,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub tab: DashboardTab,
    pub business: Business,
    /// Ordered by display order
    pub categories: Vec<Category>,
    /// One entry per category, in category order, empty categories included
    pub products_by_category: Vec<CategoryProductsDto>,
    /// Products without a (known) category; not sortable
    pub uncategorized: Vec<Product>,
}

impl DashboardDto {
    pub fn from_snapshot(snapshot: &MenuSnapshot, tab: DashboardTab) -> Self {
        let products_by_category = snapshot
            .categories
            .iter()
            .map(|category| CategoryProductsDto {
                category_id: category.id,
                products: snapshot.products_in(category.id).to_vec(),
            })
            .collect();

        let uncategorized = snapshot
            .products
            .iter()
            .filter(|p| {
                p.category_id
                    .map_or(true, |id| snapshot.category_position(id).is_none())
            })
            .cloned()
            .collect();

        Self {
            tab,
            business: snapshot.business.clone(),
            categories: snapshot.categories.clone(),
            products_by_category,
            uncategorized,
        }
    }
}

// ============================================================================
// Ordering results
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeDto {
    Reconciled,
    RolledBack,
    Unchanged,
}

impl From<Outcome> for OutcomeDto {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Reconciled => OutcomeDto::Reconciled,
            Outcome::RolledBack => OutcomeDto::RolledBack,
            Outcome::Unchanged => OutcomeDto::Unchanged,
        }
    }
}

/// Result of a reorder, move or toggle. A rolled back operation is not an
/// error: `dashboard` then holds freshly fetched data.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReconcileResultDto {
    pub reconciled: bool,
    pub outcome: OutcomeDto,
    pub dashboard: DashboardDto,
}

impl ReconcileResultDto {
    pub fn new(reconciliation: &Reconciliation, tab: DashboardTab) -> Self {
        Self {
            reconciled: reconciliation.outcome != Outcome::RolledBack,
            outcome: reconciliation.outcome.into(),
            dashboard: DashboardDto::from_snapshot(&reconciliation.snapshot, tab),
        }
    }
}

// ============================================================================
// Drag input
// ============================================================================

/// What a dragged item was released over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DropTargetDto {
    /// Another sortable item
    Item { id: Uuid },
    /// A list's drop region. Product lists are identified by category id;
    /// the category list has no id.
    Container { id: Option<Uuid> },
}

impl DropTargetDto {
    pub fn into_target(self, kind: DragContextKind) -> Result<DropTarget> {
        match (self, kind) {
            (DropTargetDto::Item { id }, _) => Ok(DropTarget::Item(id)),
            (DropTargetDto::Container { .. }, DragContextKind::Categories) => {
                Ok(DropTarget::Container(ScopeId::Categories))
            }
            (DropTargetDto::Container { id: Some(id) }, DragContextKind::Products) => {
                Ok(DropTarget::Container(ScopeId::Category(id)))
            }
            (DropTargetDto::Container { id: None }, DragContextKind::Products) => Err(
                AppError::BadRequest("Product containers need a category id".to_string()),
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DragEndDto {
    pub active_id: Uuid,
    /// Absent when released outside every drop target
    pub over: Option<DropTargetDto>,
}

impl DragEndDto {
    pub fn into_drag_end(self, kind: DragContextKind) -> Result<DragEnd> {
        Ok(DragEnd {
            active: self.active_id,
            over: self.over.map(|o| o.into_target(kind)).transpose()?,
        })
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DroppableDto {
    pub target: DropTargetDto,
    pub rect: Rect,
}

/// One recorded input event, timestamps in milliseconds since gesture start
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEventDto {
    PointerDown { item: Uuid, position: Point, at_ms: u64 },
    TouchStart { item: Uuid, position: Point, at_ms: u64 },
    Move { position: Point, at_ms: u64 },
    Release { position: Point, at_ms: u64 },
    Cancel,
    KeyActivate { item: Uuid },
    KeyStep { direction: Direction },
    KeyDrop,
    KeyCancel,
}

impl From<GestureEventDto> for GestureEvent {
    fn from(event: GestureEventDto) -> Self {
        match event {
            GestureEventDto::PointerDown { item, position, at_ms } => {
                GestureEvent::PointerDown { item, position, at_ms }
            }
            GestureEventDto::TouchStart { item, position, at_ms } => {
                GestureEvent::TouchStart { item, position, at_ms }
            }
            GestureEventDto::Move { position, at_ms } => GestureEvent::Move { position, at_ms },
            GestureEventDto::Release { position, at_ms } => {
                GestureEvent::Release { position, at_ms }
            }
            GestureEventDto::Cancel => GestureEvent::Cancel,
            GestureEventDto::KeyActivate { item } => GestureEvent::KeyActivate { item },
            GestureEventDto::KeyStep { direction } => GestureEvent::KeyStep(direction),
            GestureEventDto::KeyDrop => GestureEvent::KeyDrop,
            GestureEventDto::KeyCancel => GestureEvent::KeyCancel,
        }
    }
}

/// A recorded gesture: measured drop regions plus the raw events
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GestureDto {
    pub droppables: Vec<DroppableDto>,
    pub events: Vec<GestureEventDto>,
}

impl GestureDto {
    pub fn droppables(&self, kind: DragContextKind) -> Result<Vec<Droppable>> {
        self.droppables
            .iter()
            .map(|d| {
                Ok(Droppable {
                    target: d.target.into_target(kind)?,
                    rect: d.rect,
                })
            })
            .collect()
    }

    pub fn events(&self) -> Vec<GestureEvent> {
        self.events.iter().copied().map(GestureEvent::from).collect()
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MoveStepDto {
    pub direction: Direction,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AvailabilityDto {
    pub is_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::MenuFixture;
    use serde_json::json;

    #[test]
    fn test_unknown_tab_falls_back_to_products() {
        assert_eq!(DashboardTab::parse_or_default(None), DashboardTab::Products);
        assert_eq!(
            DashboardTab::parse_or_default(Some("bogus")),
            DashboardTab::Products
        );
        assert_eq!(
            DashboardTab::parse_or_default(Some("settings")),
            DashboardTab::Settings
        );
    }

    #[test]
    fn test_dashboard_lists_empty_categories() {
        let fixture = MenuFixture::with_empty_category();
        let snapshot = MenuSnapshot::new(
            fixture.business.clone(),
            fixture.categories.clone(),
            fixture.products.clone(),
        );

        let dto = DashboardDto::from_snapshot(&snapshot, DashboardTab::Products);

        assert_eq!(dto.products_by_category.len(), 2);
        assert_eq!(dto.products_by_category[0].products.len(), 1);
        assert!(dto.products_by_category[1].products.is_empty());
        assert!(dto.uncategorized.is_empty());
    }

    #[test]
    fn test_drop_target_kinds() {
        let id = Uuid::new_v4();
        let over: DropTargetDto =
            serde_json::from_value(json!({ "kind": "container", "id": id })).unwrap();
        assert_eq!(
            over.into_target(DragContextKind::Products).unwrap(),
            DropTarget::Container(ScopeId::Category(id))
        );

        let bare: DropTargetDto = serde_json::from_value(json!({ "kind": "container" })).unwrap();
        assert_eq!(
            bare.into_target(DragContextKind::Categories).unwrap(),
            DropTarget::Container(ScopeId::Categories)
        );
        assert!(bare.into_target(DragContextKind::Products).is_err());
    }

    #[test]
    fn test_gesture_events_decode() {
        let item = Uuid::new_v4();
        let gesture: GestureDto = serde_json::from_value(json!({
            "droppables": [],
            "events": [
                { "type": "key_activate", "item": item },
                { "type": "key_step", "direction": "down" },
                { "type": "key_drop" }
            ]
        }))
        .unwrap();

        assert_eq!(
            gesture.events(),
            vec![
                GestureEvent::KeyActivate { item },
                GestureEvent::KeyStep(Direction::Down),
                GestureEvent::KeyDrop,
            ]
        );
    }
}
