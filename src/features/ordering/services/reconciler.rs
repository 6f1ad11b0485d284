//! Optimistic apply, batched persistence and rollback-by-refetch
//!
//! Every intent runs under one settle gate: it is resolved against the
//! current snapshot, the optimistic snapshot replaces it immediately, the
//! write batch is awaited as a whole, and only then may the next intent
//! start. A failed batch (any rejection, or the batch timeout) discards the
//! optimistic snapshot in favour of a fresh fetch.
//!
//! Form-driven writes (create, update, delete, uploads) pass through the
//! same gate via [`Reconciler::mutate`], so they never interleave with an
//! in-flight batch.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde_json::{json, Value};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::snapshot_loader::SnapshotLoader;
use crate::core::error::{AppError, Result};
use crate::features::ordering::drag::MoveIntent;
use crate::features::ordering::models::{
    move_between_lists, reorder_within_list, ItemKind, MenuSnapshot, OrderingError,
};
use crate::features::preview::PreviewSignal;
use crate::features::products::models::Product;
use crate::modules::store::{Collection, RemoteStore, StoreError};
use crate::shared::constants::{FIELD_CATEGORY_ID, FIELD_DISPLAY_ORDER, FIELD_IS_AVAILABLE};

/// One remote update produced by a plan
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    DisplayOrder {
        collection: Collection,
        id: Uuid,
        order: i32,
    },
    CategoryAssignment {
        product_id: Uuid,
        category_id: Uuid,
    },
    Availability {
        collection: Collection,
        id: Uuid,
        is_available: bool,
    },
}

impl WriteOp {
    pub fn collection(&self) -> Collection {
        match self {
            WriteOp::DisplayOrder { collection, .. } | WriteOp::Availability { collection, .. } => {
                *collection
            }
            WriteOp::CategoryAssignment { .. } => Collection::Products,
        }
    }

    pub fn record_id(&self) -> Uuid {
        match self {
            WriteOp::DisplayOrder { id, .. } | WriteOp::Availability { id, .. } => *id,
            WriteOp::CategoryAssignment { product_id, .. } => *product_id,
        }
    }

    pub fn patch(&self) -> Value {
        match self {
            WriteOp::DisplayOrder { order, .. } => json!({ FIELD_DISPLAY_ORDER: order }),
            WriteOp::CategoryAssignment { category_id, .. } => {
                json!({ FIELD_CATEGORY_ID: category_id })
            }
            WriteOp::Availability { is_available, .. } => {
                json!({ FIELD_IS_AVAILABLE: is_available })
            }
        }
    }
}

/// Optimistic snapshot plus the writes that make it durable
#[derive(Debug, Clone)]
pub struct WritePlan {
    pub snapshot: MenuSnapshot,
    pub writes: Vec<WriteOp>,
}

fn order_writes<'a>(
    collection: Collection,
    ids: impl Iterator<Item = Uuid> + 'a,
) -> impl Iterator<Item = WriteOp> + 'a {
    ids.enumerate().map(move |(index, id)| WriteOp::DisplayOrder {
        collection,
        id,
        order: index as i32,
    })
}

pub fn plan_move(
    snapshot: &MenuSnapshot,
    intent: &MoveIntent,
) -> std::result::Result<WritePlan, OrderingError> {
    match *intent {
        MoveIntent::ReorderCategories { from, to } => {
            let ordered = reorder_within_list(&snapshot.categories, from, to)?;
            let next = snapshot.with_categories(ordered);
            let writes = order_writes(Collection::Categories, next.categories.iter().map(|c| c.id))
                .collect();
            Ok(WritePlan {
                snapshot: next,
                writes,
            })
        }
        MoveIntent::ReorderProducts {
            category_id,
            from,
            to,
        } => {
            let members = scope_members(snapshot, category_id)?;
            let ordered = reorder_within_list(members, from, to)?;
            let writes = order_writes(Collection::Products, ordered.iter().map(|p| p.id)).collect();
            Ok(WritePlan {
                snapshot: snapshot.with_product_scopes(&[(category_id, ordered)]),
                writes,
            })
        }
        MoveIntent::MoveProduct {
            product_id,
            from_category,
            to_category,
            to_index,
        } => {
            if from_category == to_category {
                let members = scope_members(snapshot, from_category)?;
                let from = members
                    .iter()
                    .position(|p| p.id == product_id)
                    .ok_or(OrderingError::ItemNotFound(product_id))?;
                let to = to_index
                    .unwrap_or(members.len() - 1)
                    .min(members.len() - 1);
                return plan_move(
                    snapshot,
                    &MoveIntent::ReorderProducts {
                        category_id: from_category,
                        from,
                        to,
                    },
                );
            }

            let source = scope_members(snapshot, from_category)?;
            let dest = scope_members(snapshot, to_category)?;
            let (source, dest) = move_between_lists(source, dest, product_id, to_index)?;

            // Category reassignment leads the batch
            let mut writes = vec![WriteOp::CategoryAssignment {
                product_id,
                category_id: to_category,
            }];
            writes.extend(order_writes(Collection::Products, source.iter().map(|p| p.id)));
            writes.extend(order_writes(Collection::Products, dest.iter().map(|p| p.id)));

            Ok(WritePlan {
                snapshot: snapshot
                    .with_product_scopes(&[(from_category, source), (to_category, dest)]),
                writes,
            })
        }
    }
}

pub fn plan_availability(
    snapshot: &MenuSnapshot,
    kind: ItemKind,
    id: Uuid,
    is_available: bool,
) -> std::result::Result<WritePlan, OrderingError> {
    let collection = match kind {
        ItemKind::Category => Collection::Categories,
        ItemKind::Product => Collection::Products,
    };
    Ok(WritePlan {
        snapshot: snapshot.with_availability(kind, id, is_available)?,
        writes: vec![WriteOp::Availability {
            collection,
            id,
            is_available,
        }],
    })
}

fn scope_members(
    snapshot: &MenuSnapshot,
    category_id: Uuid,
) -> std::result::Result<&[Product], OrderingError> {
    snapshot
        .grouping
        .get(category_id)
        .ok_or(OrderingError::ScopeNotFound(category_id))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every write landed; the optimistic snapshot is now confirmed
    Reconciled,
    /// The batch failed; the snapshot was replaced by a fresh fetch
    RolledBack,
    /// Nothing to do (unresolved drop)
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub outcome: Outcome,
    pub snapshot: Arc<MenuSnapshot>,
}

pub struct Reconciler {
    store: Arc<dyn RemoteStore>,
    loader: SnapshotLoader,
    signal: PreviewSignal,
    state: RwLock<Option<Arc<MenuSnapshot>>>,
    settle: Mutex<()>,
    batch_timeout: Duration,
}

impl Reconciler {
    pub fn new(
        store: Arc<dyn RemoteStore>,
        business_id: Uuid,
        signal: PreviewSignal,
        batch_timeout: Duration,
    ) -> Self {
        Self {
            loader: SnapshotLoader::new(Arc::clone(&store), business_id),
            store,
            signal,
            state: RwLock::new(None),
            settle: Mutex::new(()),
            batch_timeout,
        }
    }

    pub fn business_id(&self) -> Uuid {
        self.loader.business_id()
    }

    pub fn store(&self) -> &Arc<dyn RemoteStore> {
        &self.store
    }

    pub fn signal(&self) -> &PreviewSignal {
        &self.signal
    }

    /// Latest snapshot, optimistic while a batch is in flight
    pub async fn snapshot(&self) -> Option<Arc<MenuSnapshot>> {
        self.state.read().await.clone()
    }

    async fn current(&self) -> Result<Arc<MenuSnapshot>> {
        self.snapshot().await.ok_or_else(|| {
            AppError::Precondition("Dashboard data has not been loaded".to_string())
        })
    }

    async fn replace(&self, snapshot: Arc<MenuSnapshot>) {
        *self.state.write().await = Some(snapshot);
    }

    /// Full fetch replacing whatever is held
    pub async fn load(&self) -> std::result::Result<Arc<MenuSnapshot>, StoreError> {
        let _settle = self.settle.lock().await;
        let snapshot = Arc::new(self.loader.fetch().await?);
        self.replace(Arc::clone(&snapshot)).await;
        Ok(snapshot)
    }

    /// Resolve an intent against the current snapshot and reconcile it
    pub async fn reconcile<F>(&self, resolve: F) -> Result<Reconciliation>
    where
        F: FnOnce(&MenuSnapshot) -> Option<MoveIntent>,
    {
        let _settle = self.settle.lock().await;
        let confirmed = self.current().await?;

        let Some(intent) = resolve(&confirmed) else {
            tracing::debug!("Drop resolved to no move; nothing to reconcile");
            return Ok(Reconciliation {
                outcome: Outcome::Unchanged,
                snapshot: confirmed,
            });
        };

        tracing::debug!("Reconciling {:?}", intent);
        let plan = plan_move(&confirmed, &intent)?;
        Ok(self.apply(confirmed, plan).await)
    }

    pub async fn toggle_availability(
        &self,
        kind: ItemKind,
        id: Uuid,
        is_available: bool,
    ) -> Result<Reconciliation> {
        let _settle = self.settle.lock().await;
        let confirmed = self.current().await?;

        let plan = plan_availability(&confirmed, kind, id, is_available)?;
        Ok(self.apply(confirmed, plan).await)
    }

    /// Run a create, update or delete under the settle gate. On success the
    /// snapshot is refetched and the preview signalled before the gate opens.
    pub async fn mutate<T, F, Fut>(&self, write: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let _settle = self.settle.lock().await;
        let value = write().await?;

        match self.loader.fetch().await {
            Ok(snapshot) => self.replace(Arc::new(snapshot)).await,
            Err(e) => tracing::warn!("Refetch after mutation failed: {}", e),
        }
        self.signal.publish();
        Ok(value)
    }

    async fn apply(&self, confirmed: Arc<MenuSnapshot>, plan: WritePlan) -> Reconciliation {
        let optimistic = Arc::new(plan.snapshot);
        self.replace(Arc::clone(&optimistic)).await;

        tracing::debug!("Persisting batch of {} write(s)", plan.writes.len());

        match self.execute(&plan.writes).await {
            Ok(()) => {
                tracing::info!("Reconciled batch of {} write(s)", plan.writes.len());
                self.signal.publish();
                Reconciliation {
                    outcome: Outcome::Reconciled,
                    snapshot: optimistic,
                }
            }
            Err(e) => {
                tracing::warn!("Write batch failed, rolling back: {}", e);
                Reconciliation {
                    outcome: Outcome::RolledBack,
                    snapshot: self.recover(confirmed).await,
                }
            }
        }
    }

    /// Issue all writes concurrently; the batch fails as a whole
    async fn execute(&self, writes: &[WriteOp]) -> std::result::Result<(), StoreError> {
        let batch = join_all(writes.iter().map(|write| {
            self.store
                .update_by_id(write.collection(), write.record_id(), write.patch())
        }));

        let results = tokio::time::timeout(self.batch_timeout, batch)
            .await
            .map_err(|_| {
                StoreError::Timeout(format!(
                    "write batch did not settle within {:?}",
                    self.batch_timeout
                ))
            })?;

        results.into_iter().collect()
    }

    async fn recover(&self, confirmed: Arc<MenuSnapshot>) -> Arc<MenuSnapshot> {
        match self.loader.fetch().await {
            Ok(fresh) => {
                let fresh = Arc::new(fresh);
                self.replace(Arc::clone(&fresh)).await;
                fresh
            }
            Err(e) => {
                tracing::error!("Refetch after rollback failed, keeping last confirmed state: {}", e);
                self.replace(Arc::clone(&confirmed)).await;
                confirmed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ordering::drag::{resolve_drop, DragEnd, DropTarget, ScopeId, SortableLayout};
    use crate::features::preview::PreviewMessage;
    use crate::modules::store::memory::InMemoryStore;
    use crate::shared::test_helpers::{seeded_store, MenuFixture};
    use tokio::sync::broadcast::Receiver;

    async fn loaded(
        store: &Arc<InMemoryStore>,
        business_id: Uuid,
        timeout: Duration,
    ) -> (Arc<Reconciler>, Receiver<PreviewMessage>) {
        let signal = PreviewSignal::new(16);
        let receiver = signal.subscribe();
        let reconciler = Arc::new(Reconciler::new(store.clone(), business_id, signal, timeout));
        reconciler.load().await.unwrap();
        (reconciler, receiver)
    }

    fn persisted_order(store: &InMemoryStore, collection: Collection, id: Uuid) -> i64 {
        store.record(collection, id).unwrap()[FIELD_DISPLAY_ORDER]
            .as_i64()
            .unwrap()
    }

    fn persisted_category(store: &InMemoryStore, product_id: Uuid) -> Option<String> {
        store.record(Collection::Products, product_id).unwrap()[FIELD_CATEGORY_ID]
            .as_str()
            .map(str::to_string)
    }

    async fn fresh(store: &Arc<InMemoryStore>, business_id: Uuid) -> MenuSnapshot {
        SnapshotLoader::new(store.clone(), business_id)
            .fetch()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_category_drag_to_end_persists_dense_order() {
        let fixture = MenuFixture::three_categories();
        let store = seeded_store(&fixture);
        let (reconciler, mut signals) =
            loaded(&store, fixture.business.id, Duration::from_secs(5)).await;
        let [a, b, c] = [0, 1, 2].map(|i| fixture.categories[i].id);

        let result = reconciler
            .reconcile(|s| {
                resolve_drop(
                    &SortableLayout::for_categories(s),
                    &DragEnd { active: a, over: Some(DropTarget::Item(c)) },
                )
            })
            .await
            .unwrap();

        assert_eq!(result.outcome, Outcome::Reconciled);
        let order: Vec<Uuid> = result.snapshot.categories.iter().map(|c| c.id).collect();
        assert_eq!(order, vec![b, c, a]);
        assert_eq!(persisted_order(&store, Collection::Categories, b), 0);
        assert_eq!(persisted_order(&store, Collection::Categories, c), 1);
        assert_eq!(persisted_order(&store, Collection::Categories, a), 2);
        assert_eq!(signals.try_recv().unwrap(), PreviewMessage::Refresh);
    }

    #[tokio::test]
    async fn test_cross_category_move_reassigns_and_renumbers_both_scopes() {
        let fixture = MenuFixture::two_categories();
        let store = seeded_store(&fixture);
        let (reconciler, mut signals) =
            loaded(&store, fixture.business.id, Duration::from_secs(5)).await;
        let (x, y) = (fixture.categories[0].id, fixture.categories[1].id);
        let [p1, p2, p3] = [0, 1, 2].map(|i| fixture.products[i].id);

        let result = reconciler
            .reconcile(|s| {
                resolve_drop(
                    &SortableLayout::for_products(s),
                    &DragEnd { active: p1, over: Some(DropTarget::Item(p3)) },
                )
            })
            .await
            .unwrap();

        assert_eq!(result.outcome, Outcome::Reconciled);
        assert_eq!(persisted_category(&store, p1), Some(y.to_string()));
        assert_eq!(persisted_order(&store, Collection::Products, p2), 0);
        assert_eq!(persisted_order(&store, Collection::Products, p1), 0);
        assert_eq!(persisted_order(&store, Collection::Products, p3), 1);

        let x_members: Vec<Uuid> = result.snapshot.products_in(x).iter().map(|p| p.id).collect();
        let y_members: Vec<Uuid> = result.snapshot.products_in(y).iter().map(|p| p.id).collect();
        assert_eq!(x_members, vec![p2]);
        assert_eq!(y_members, vec![p1, p3]);
        assert_eq!(*result.snapshot, fresh(&store, fixture.business.id).await);
        assert!(signals.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_drop_on_empty_category_lands_at_index_zero() {
        let fixture = MenuFixture::with_empty_category();
        let store = seeded_store(&fixture);
        let (reconciler, _signals) =
            loaded(&store, fixture.business.id, Duration::from_secs(5)).await;
        let empty = fixture.categories[1].id;
        let p1 = fixture.products[0].id;

        let result = reconciler
            .reconcile(|s| {
                resolve_drop(
                    &SortableLayout::for_products(s),
                    &DragEnd {
                        active: p1,
                        over: Some(DropTarget::Container(ScopeId::Category(empty))),
                    },
                )
            })
            .await
            .unwrap();

        assert_eq!(result.outcome, Outcome::Reconciled);
        assert_eq!(result.snapshot.products_in(empty)[0].id, p1);
        assert_eq!(persisted_order(&store, Collection::Products, p1), 0);
        assert_eq!(persisted_category(&store, p1), Some(empty.to_string()));
    }

    #[tokio::test]
    async fn test_within_scope_reorder_writes_every_member() {
        let fixture = MenuFixture::two_categories();
        let store = seeded_store(&fixture);
        let (reconciler, _signals) =
            loaded(&store, fixture.business.id, Duration::from_secs(5)).await;
        let x = fixture.categories[0].id;
        let [p1, p2] = [0, 1].map(|i| fixture.products[i].id);

        let result = reconciler
            .reconcile(|_| Some(MoveIntent::ReorderProducts { category_id: x, from: 1, to: 0 }))
            .await
            .unwrap();

        assert_eq!(result.outcome, Outcome::Reconciled);
        assert_eq!(persisted_order(&store, Collection::Products, p2), 0);
        assert_eq!(persisted_order(&store, Collection::Products, p1), 1);
        assert_eq!(store.update_log().len(), 2);
    }

    #[tokio::test]
    async fn test_unresolved_drop_changes_nothing() {
        let fixture = MenuFixture::three_categories();
        let store = seeded_store(&fixture);
        let (reconciler, mut signals) =
            loaded(&store, fixture.business.id, Duration::from_secs(5)).await;
        let before = reconciler.snapshot().await.unwrap();

        let result = reconciler.reconcile(|_| None).await.unwrap();

        assert_eq!(result.outcome, Outcome::Unchanged);
        assert!(Arc::ptr_eq(&before, &result.snapshot));
        assert!(store.update_log().is_empty());
        assert!(signals.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_rejected_reorder_rolls_back_to_fresh_fetch() {
        let fixture = MenuFixture::three_categories();
        let store = seeded_store(&fixture);
        let (reconciler, mut signals) =
            loaded(&store, fixture.business.id, Duration::from_secs(5)).await;
        store.fail_updates_on(Collection::Categories, FIELD_DISPLAY_ORDER);

        let result = reconciler
            .reconcile(|_| Some(MoveIntent::ReorderCategories { from: 0, to: 2 }))
            .await
            .unwrap();

        assert_eq!(result.outcome, Outcome::RolledBack);
        assert_eq!(*result.snapshot, fresh(&store, fixture.business.id).await);
        assert_eq!(result.snapshot.categories[0].id, fixture.categories[0].id);
        assert!(signals.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_partial_batch_failure_converges_to_ground_truth() {
        let fixture = MenuFixture::two_categories();
        let store = seeded_store(&fixture);
        let (reconciler, _signals) =
            loaded(&store, fixture.business.id, Duration::from_secs(5)).await;
        let [p1, p3] = [0, 2].map(|i| fixture.products[i].id);
        store.fail_updates_for(p3);

        let result = reconciler
            .reconcile(|_| {
                Some(MoveIntent::MoveProduct {
                    product_id: p1,
                    from_category: fixture.categories[0].id,
                    to_category: fixture.categories[1].id,
                    to_index: Some(0),
                })
            })
            .await
            .unwrap();

        assert_eq!(result.outcome, Outcome::RolledBack);
        assert_eq!(*result.snapshot, fresh(&store, fixture.business.id).await);
    }

    #[tokio::test]
    async fn test_hung_batch_times_out_as_failure() {
        let fixture = MenuFixture::three_categories();
        let store = seeded_store(&fixture);
        let (reconciler, _signals) =
            loaded(&store, fixture.business.id, Duration::from_millis(20)).await;
        store.set_update_delay(Duration::from_millis(500));

        let result = reconciler
            .reconcile(|_| Some(MoveIntent::ReorderCategories { from: 0, to: 1 }))
            .await
            .unwrap();

        assert_eq!(result.outcome, Outcome::RolledBack);
    }

    #[tokio::test]
    async fn test_failed_refetch_keeps_last_confirmed_snapshot() {
        let fixture = MenuFixture::three_categories();
        let store = seeded_store(&fixture);
        let (reconciler, _signals) =
            loaded(&store, fixture.business.id, Duration::from_secs(5)).await;
        let confirmed = reconciler.snapshot().await.unwrap();
        store.fail_updates_on(Collection::Categories, FIELD_DISPLAY_ORDER);
        store.set_fail_selects(true);

        let result = reconciler
            .reconcile(|_| Some(MoveIntent::ReorderCategories { from: 0, to: 2 }))
            .await
            .unwrap();

        assert_eq!(result.outcome, Outcome::RolledBack);
        assert_eq!(*result.snapshot, *confirmed);
        assert_eq!(*reconciler.snapshot().await.unwrap(), *confirmed);
    }

    #[tokio::test]
    async fn test_toggle_waits_for_in_flight_reorder() {
        let fixture = MenuFixture::two_categories();
        let store = seeded_store(&fixture);
        let (reconciler, _signals) =
            loaded(&store, fixture.business.id, Duration::from_secs(5)).await;
        let x = fixture.categories[0].id;
        let p1 = fixture.products[0].id;
        store.set_update_delay(Duration::from_millis(30));

        let (reorder, toggle) = tokio::join!(
            reconciler.reconcile(|_| Some(MoveIntent::ReorderProducts { category_id: x, from: 0, to: 1 })),
            reconciler.toggle_availability(ItemKind::Product, p1, false),
        );

        assert_eq!(reorder.unwrap().outcome, Outcome::Reconciled);
        let toggle = toggle.unwrap();
        assert_eq!(toggle.outcome, Outcome::Reconciled);
        assert_eq!(store.overlapping_writes(), 0);

        let log = store.update_log();
        assert_eq!(log.len(), 3);
        assert_eq!(log[2].patch, json!({ FIELD_IS_AVAILABLE: false }));

        // The toggle applied on top of the settled reorder
        let x_members: Vec<(Uuid, bool)> = toggle
            .snapshot
            .products_in(x)
            .iter()
            .map(|p| (p.id, p.is_available))
            .collect();
        assert_eq!(x_members, vec![(fixture.products[1].id, true), (p1, false)]);
    }

    #[tokio::test]
    async fn test_concurrent_reorders_never_overlap() {
        let fixture = MenuFixture::three_categories();
        let store = seeded_store(&fixture);
        let (reconciler, _signals) =
            loaded(&store, fixture.business.id, Duration::from_secs(5)).await;
        store.set_update_delay(Duration::from_millis(10));

        let (first, second) = tokio::join!(
            reconciler.reconcile(|_| Some(MoveIntent::ReorderCategories { from: 0, to: 2 })),
            reconciler.reconcile(|_| Some(MoveIntent::ReorderCategories { from: 0, to: 1 })),
        );

        assert_eq!(first.unwrap().outcome, Outcome::Reconciled);
        let second = second.unwrap();
        assert_eq!(store.overlapping_writes(), 0);
        assert_eq!(*second.snapshot, fresh(&store, fixture.business.id).await);
        let orders: Vec<i32> = second.snapshot.categories.iter().map(|c| c.display_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_rejected_toggle_rolls_back() {
        let fixture = MenuFixture::two_categories();
        let store = seeded_store(&fixture);
        let (reconciler, _signals) =
            loaded(&store, fixture.business.id, Duration::from_secs(5)).await;
        let x = fixture.categories[0].id;
        store.fail_updates_on(Collection::Categories, FIELD_IS_AVAILABLE);

        let result = reconciler
            .toggle_availability(ItemKind::Category, x, false)
            .await
            .unwrap();

        assert_eq!(result.outcome, Outcome::RolledBack);
        assert!(result.snapshot.categories[0].is_available);
        assert_eq!(*result.snapshot, fresh(&store, fixture.business.id).await);
        assert_eq!(*reconciler.snapshot().await.unwrap(), *result.snapshot);
    }

    #[tokio::test]
    async fn test_rejected_product_toggle_rolls_back_to_fresh_fetch() {
        let fixture = MenuFixture::two_categories();
        let store = seeded_store(&fixture);
        let (reconciler, mut signals) =
            loaded(&store, fixture.business.id, Duration::from_secs(5)).await;
        let (x, p2) = (fixture.categories[0].id, fixture.products[1].id);
        store.fail_updates_for(p2);

        let result = reconciler
            .toggle_availability(ItemKind::Product, p2, false)
            .await
            .unwrap();

        assert_eq!(result.outcome, Outcome::RolledBack);
        assert!(result.snapshot.products_in(x)[1].is_available);
        assert_eq!(*result.snapshot, fresh(&store, fixture.business.id).await);
        assert!(store.update_log().is_empty());
        assert!(signals.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_mutation_waits_for_in_flight_batch() {
        let fixture = MenuFixture::three_categories();
        let store = seeded_store(&fixture);
        let (reconciler, mut signals) =
            loaded(&store, fixture.business.id, Duration::from_secs(5)).await;
        let a = fixture.categories[0].id;
        store.set_update_delay(Duration::from_millis(30));

        let writer = Arc::clone(&store);
        let (reorder, written) = tokio::join!(
            reconciler.reconcile(|_| Some(MoveIntent::ReorderCategories { from: 0, to: 2 })),
            reconciler.mutate(|| async move {
                writer
                    .update_by_id(Collection::Categories, a, json!({ FIELD_DISPLAY_ORDER: 0 }))
                    .await?;
                Ok::<_, AppError>(a)
            }),
        );

        assert_eq!(reorder.unwrap().outcome, Outcome::Reconciled);
        assert_eq!(written.unwrap(), a);
        assert_eq!(store.overlapping_writes(), 0);
        // The form write landed after the whole batch
        let log = store.update_log();
        assert_eq!(log.len(), 4);
        assert_eq!(log[3].id, a);
        assert_eq!(signals.try_recv().unwrap(), PreviewMessage::Refresh);
        assert_eq!(signals.try_recv().unwrap(), PreviewMessage::Refresh);
        assert_eq!(
            *reconciler.snapshot().await.unwrap(),
            fresh(&store, fixture.business.id).await
        );
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_snapshot_and_stays_silent() {
        let fixture = MenuFixture::three_categories();
        let store = seeded_store(&fixture);
        let (reconciler, mut signals) =
            loaded(&store, fixture.business.id, Duration::from_secs(5)).await;
        let before = reconciler.snapshot().await.unwrap();

        let result: Result<()> = reconciler
            .mutate(|| async { Err::<(), _>(AppError::BadRequest("rejected".to_string())) })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(Arc::ptr_eq(&before, &reconciler.snapshot().await.unwrap()));
        assert!(signals.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_reconcile_before_load_is_a_precondition_failure() {
        let fixture = MenuFixture::three_categories();
        let store = seeded_store(&fixture);
        let reconciler = Reconciler::new(
            store,
            fixture.business.id,
            PreviewSignal::new(4),
            Duration::from_secs(5),
        );

        let result = reconciler
            .reconcile(|_| Some(MoveIntent::ReorderCategories { from: 0, to: 1 }))
            .await;
        assert!(matches!(result, Err(AppError::Precondition(_))));
    }
}
