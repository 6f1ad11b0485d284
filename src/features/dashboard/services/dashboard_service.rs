use std::sync::Arc;

use uuid::Uuid;

use crate::core::config::OrderingConfig;
use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::{
    DashboardDto, DashboardTab, DragEndDto, GestureDto, ReconcileResultDto,
};
use crate::features::ordering::drag::{
    resolve_drop, Direction, DragContextConfig, DragContextKind, DragEngine, DragLayout,
    GestureEvent, SortableLayout,
};
use crate::features::ordering::models::{ItemKind, MenuSnapshot};
use crate::features::ordering::Reconciler;

/// Sortable members of a drag context
fn sortable_for(kind: DragContextKind, snapshot: &MenuSnapshot) -> SortableLayout {
    match kind {
        DragContextKind::Categories => SortableLayout::for_categories(snapshot),
        DragContextKind::Products => SortableLayout::for_products(snapshot),
    }
}

/// Admin dashboard: the loaded menu plus the ordering and availability
/// operations driven from its lists
pub struct DashboardService {
    reconciler: Arc<Reconciler>,
    categories: DragContextConfig,
    products: DragContextConfig,
}

impl DashboardService {
    pub fn new(reconciler: Arc<Reconciler>, config: &OrderingConfig) -> Self {
        Self {
            reconciler,
            categories: DragContextConfig::categories(config),
            products: DragContextConfig::products(config),
        }
    }

    fn context(&self, kind: DragContextKind) -> DragContextConfig {
        match kind {
            DragContextKind::Categories => self.categories,
            DragContextKind::Products => self.products,
        }
    }

    async fn loaded(&self) -> Result<Arc<MenuSnapshot>> {
        self.reconciler.snapshot().await.ok_or_else(|| {
            AppError::Precondition("Dashboard data has not been loaded".to_string())
        })
    }

    pub async fn dashboard(&self, tab: DashboardTab) -> Result<DashboardDto> {
        let snapshot = self.loaded().await?;
        Ok(DashboardDto::from_snapshot(&snapshot, tab))
    }

    /// Manual full refetch
    pub async fn reload(&self, tab: DashboardTab) -> Result<DashboardDto> {
        let snapshot = self.reconciler.load().await.map_err(|e| {
            tracing::error!("Dashboard reload failed: {}", e);
            AppError::from(e)
        })?;
        tracing::info!(
            "Dashboard reloaded: {} categories, {} products",
            snapshot.categories.len(),
            snapshot.products.len()
        );
        Ok(DashboardDto::from_snapshot(&snapshot, tab))
    }

    /// Apply an already resolved drop
    pub async fn drag_end(
        &self,
        kind: DragContextKind,
        dto: DragEndDto,
    ) -> Result<ReconcileResultDto> {
        let end = dto.into_drag_end(kind)?;

        let reconciliation = self
            .reconciler
            .reconcile(|snapshot| resolve_drop(&sortable_for(kind, snapshot), &end))
            .await?;

        Ok(ReconcileResultDto::new(&reconciliation, kind.into()))
    }

    /// Replay a recorded gesture and apply the drop it ends in, if any
    pub async fn gesture(
        &self,
        kind: DragContextKind,
        dto: GestureDto,
    ) -> Result<ReconcileResultDto> {
        let droppables = dto.droppables(kind)?;
        let events = dto.events();
        let context = self.context(kind);

        let reconciliation = self
            .reconciler
            .reconcile(|snapshot| {
                let layout = DragLayout {
                    sortable: sortable_for(kind, snapshot),
                    droppables,
                };
                let end = DragEngine::new(context).replay(&events, &layout)?;
                resolve_drop(&layout.sortable, &end)
            })
            .await?;

        Ok(ReconcileResultDto::new(&reconciliation, kind.into()))
    }

    /// Keyboard step: pick up, move one slot, drop
    pub async fn step(
        &self,
        kind: DragContextKind,
        id: Uuid,
        direction: Direction,
    ) -> Result<ReconcileResultDto> {
        let snapshot = self.loaded().await?;
        if sortable_for(kind, &snapshot).locate(id).is_none() {
            return Err(AppError::NotFound(format!("No sortable item '{}'", id)));
        }

        let events = [
            GestureEvent::KeyActivate { item: id },
            GestureEvent::KeyStep(direction),
            GestureEvent::KeyDrop,
        ];
        let context = self.context(kind);

        let reconciliation = self
            .reconciler
            .reconcile(|snapshot| {
                let layout = DragLayout {
                    sortable: sortable_for(kind, snapshot),
                    droppables: Vec::new(),
                };
                let end = DragEngine::new(context).replay(&events, &layout)?;
                resolve_drop(&layout.sortable, &end)
            })
            .await?;

        Ok(ReconcileResultDto::new(&reconciliation, kind.into()))
    }

    pub async fn set_availability(
        &self,
        kind: ItemKind,
        id: Uuid,
        is_available: bool,
    ) -> Result<ReconcileResultDto> {
        let reconciliation = self
            .reconciler
            .toggle_availability(kind, id, is_available)
            .await?;

        let tab = match kind {
            ItemKind::Category => DashboardTab::Categories,
            ItemKind::Product => DashboardTab::Products,
        };
        Ok(ReconcileResultDto::new(&reconciliation, tab))
    }
}
