//! In-process [`RemoteStore`] used by tests, with failure injection and an
//! update log for asserting what was persisted.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::{Collection, Query, RemoteStore, StoreError};
use crate::shared::constants::FIELD_ID;

#[derive(Debug, Clone)]
pub struct UpdateRecord {
    pub collection: Collection,
    pub id: Uuid,
    pub patch: Value,
}

#[derive(Default)]
pub struct InMemoryStore {
    rows: Mutex<HashMap<Collection, Vec<Value>>>,
    failing_update_fields: Mutex<HashSet<(Collection, String)>>,
    failing_update_ids: Mutex<HashSet<Uuid>>,
    fail_selects: Mutex<bool>,
    update_delay: Mutex<Option<Duration>>,
    updates: Mutex<Vec<UpdateRecord>>,
    in_flight: Mutex<HashSet<(Uuid, String)>>,
    overlapping_writes: AtomicUsize,
    select_calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, collection: Collection, records: Vec<Value>) {
        self.rows
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .extend(records);
    }

    /// Updates to `collection` touching `field` are rejected
    pub fn fail_updates_on(&self, collection: Collection, field: &str) {
        self.failing_update_fields
            .lock()
            .unwrap()
            .insert((collection, field.to_string()));
    }

    /// Updates targeting this record id are rejected
    pub fn fail_updates_for(&self, id: Uuid) {
        self.failing_update_ids.lock().unwrap().insert(id);
    }

    pub fn set_fail_selects(&self, fail: bool) {
        *self.fail_selects.lock().unwrap() = fail;
    }

    pub fn set_update_delay(&self, delay: Duration) {
        *self.update_delay.lock().unwrap() = Some(delay);
    }

    pub fn clear_failures(&self) {
        self.failing_update_fields.lock().unwrap().clear();
        self.failing_update_ids.lock().unwrap().clear();
        *self.fail_selects.lock().unwrap() = false;
    }

    pub fn update_log(&self) -> Vec<UpdateRecord> {
        self.updates.lock().unwrap().clone()
    }

    /// Number of updates that started while another update to the same
    /// record field was still in flight
    pub fn overlapping_writes(&self) -> usize {
        self.overlapping_writes.load(Ordering::SeqCst)
    }

    pub fn select_calls(&self) -> usize {
        self.select_calls.load(Ordering::SeqCst)
    }

    pub fn record(&self, collection: Collection, id: Uuid) -> Option<Value> {
        let rows = self.rows.lock().unwrap();
        rows.get(&collection)?
            .iter()
            .find(|r| record_id(r) == Some(id))
            .cloned()
    }

    fn check_selects(&self) -> Result<(), StoreError> {
        self.select_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_selects.lock().unwrap() {
            return Err(StoreError::Transport("simulated network failure".to_string()));
        }
        Ok(())
    }

    fn should_fail_update(&self, collection: Collection, id: Uuid, patch: &Value) -> bool {
        if self.failing_update_ids.lock().unwrap().contains(&id) {
            return true;
        }
        let fields = self.failing_update_fields.lock().unwrap();
        patch
            .as_object()
            .map(|obj| {
                obj.keys()
                    .any(|k| fields.contains(&(collection, k.to_string())))
            })
            .unwrap_or(false)
    }
}

fn record_id(record: &Value) -> Option<Uuid> {
    record
        .get(FIELD_ID)
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
}

fn sort_key(record: &Value, field: &str) -> i64 {
    record.get(field).and_then(Value::as_i64).unwrap_or(i64::MAX)
}

#[async_trait]
impl RemoteStore for InMemoryStore {
    async fn select_all(
        &self,
        collection: Collection,
        query: &Query,
    ) -> Result<Vec<Value>, StoreError> {
        self.check_selects()?;
        let rows = self.rows.lock().unwrap();
        let mut matched: Vec<Value> = rows
            .get(&collection)
            .map(|records| records.iter().filter(|r| query.matches(r)).cloned().collect())
            .unwrap_or_default();

        if let Some(field) = query.order_by() {
            // Stable sort keeps insertion order for ties
            matched.sort_by_key(|r| sort_key(r, field));
        }

        Ok(matched)
    }

    async fn select_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<Value>, StoreError> {
        self.check_selects()?;
        Ok(self.record(collection, id))
    }

    async fn insert(&self, collection: Collection, mut record: Value) -> Result<Value, StoreError> {
        if let Some(obj) = record.as_object_mut() {
            obj.entry(FIELD_ID)
                .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
            obj.entry("created_at")
                .or_insert_with(|| Value::String(chrono::Utc::now().to_rfc3339()));
        }
        self.rows
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: Uuid,
        patch: Value,
    ) -> Result<(), StoreError> {
        let fields: Vec<String> = patch
            .as_object()
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default();

        {
            let mut in_flight = self.in_flight.lock().unwrap();
            for field in &fields {
                if !in_flight.insert((id, field.clone())) {
                    self.overlapping_writes.fetch_add(1, Ordering::SeqCst);
                }
            }
        }

        let delay = *self.update_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let result = if self.should_fail_update(collection, id, &patch) {
            Err(StoreError::Rejected {
                status: 500,
                message: "simulated rejection".to_string(),
            })
        } else {
            let mut rows = self.rows.lock().unwrap();
            let target = rows
                .get_mut(&collection)
                .and_then(|records| records.iter_mut().find(|r| record_id(r) == Some(id)));

            match (target, patch.as_object()) {
                (Some(Value::Object(existing)), Some(changes)) => {
                    for (k, v) in changes {
                        existing.insert(k.clone(), v.clone());
                    }
                    self.updates.lock().unwrap().push(UpdateRecord {
                        collection,
                        id,
                        patch: patch.clone(),
                    });
                    Ok(())
                }
                _ => Err(StoreError::NotFound(format!(
                    "{} record '{}' not found",
                    collection, id
                ))),
            }
        };

        let mut in_flight = self.in_flight.lock().unwrap();
        for field in fields {
            in_flight.remove(&(id, field));
        }

        result
    }

    async fn delete_by_id(&self, collection: Collection, id: Uuid) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(records) = rows.get_mut(&collection) {
            records.retain(|r| record_id(r) != Some(id));
        }
        Ok(())
    }

    async fn count(&self, collection: Collection, query: &Query) -> Result<u64, StoreError> {
        self.check_selects()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .get(&collection)
            .map(|records| records.iter().filter(|r| query.matches(r)).count() as u64)
            .unwrap_or(0))
    }
}
