//! Preview-side refetch loop
//!
//! Signals are folded into a single pending wake-up: one arriving while a
//! fetch is outstanding schedules exactly one more fetch, however many
//! arrive.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::{Notify, RwLock};

use super::menu_service::MenuSource;
use super::preview_signal::PreviewMessage;
use crate::features::preview::dtos::PublicMenuDto;
use crate::modules::store::StoreError;

pub struct PreviewRefresher {
    source: Arc<dyn MenuSource>,
    latest: RwLock<Option<Arc<PublicMenuDto>>>,
    wake: Notify,
    fetches: AtomicUsize,
}

impl PreviewRefresher {
    pub fn new(source: Arc<dyn MenuSource>) -> Self {
        Self {
            source,
            latest: RwLock::new(None),
            wake: Notify::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Spawn the signal listener and the fetch loop. The loop starts with an
    /// initial fetch.
    pub fn start(self: &Arc<Self>, receiver: broadcast::Receiver<PreviewMessage>) {
        let listener = Arc::clone(self);
        tokio::spawn(async move { listener.listen(receiver).await });

        let worker = Arc::clone(self);
        tokio::spawn(async move { worker.run().await });
    }

    /// Schedule a fetch; coalesces with any fetch already pending
    pub fn request_refresh(&self) {
        self.wake.notify_one();
    }

    pub async fn latest(&self) -> Option<Arc<PublicMenuDto>> {
        self.latest.read().await.clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Fetch immediately, bypassing the loop
    pub async fn fetch_now(&self) -> Result<Arc<PublicMenuDto>, StoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let menu = Arc::new(self.source.fetch_menu().await?);
        *self.latest.write().await = Some(Arc::clone(&menu));
        Ok(menu)
    }

    async fn listen(&self, mut receiver: broadcast::Receiver<PreviewMessage>) {
        loop {
            match receiver.recv().await {
                Ok(PreviewMessage::Refresh) => self.request_refresh(),
                // Missed signals still mean the data changed
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!("Preview listener lagged by {} signal(s)", skipped);
                    self.request_refresh();
                }
                Err(RecvError::Closed) => {
                    tracing::debug!("Preview signal channel closed, listener exiting");
                    break;
                }
            }
        }
    }

    async fn run(&self) {
        self.request_refresh();
        loop {
            self.wake.notified().await;
            tracing::debug!("Refreshing preview menu");
            if let Err(e) = self.fetch_now().await {
                tracing::warn!("Preview menu fetch failed: {}", e);
            }
        }
    }
}
