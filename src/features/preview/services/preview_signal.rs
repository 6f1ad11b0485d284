use tokio::sync::broadcast;

use crate::shared::constants::PREVIEW_REFRESH_SENTINEL;

/// Message carried by the preview channel. Its wire form is a fixed sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewMessage {
    Refresh,
}

impl PreviewMessage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewMessage::Refresh => PREVIEW_REFRESH_SENTINEL,
        }
    }
}

/// Fire-and-forget "menu data changed" notification
///
/// One publisher (the admin side), any number of preview subscribers.
/// Delivery is advisory: publishing with nobody listening is not an error.
#[derive(Debug, Clone)]
pub struct PreviewSignal {
    sender: broadcast::Sender<PreviewMessage>,
}

impl PreviewSignal {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self) {
        match self.sender.send(PreviewMessage::Refresh) {
            Ok(receivers) => tracing::debug!("Preview refresh signalled to {} subscriber(s)", receivers),
            Err(_) => tracing::debug!("Preview refresh signalled with no subscribers"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PreviewMessage> {
        self.sender.subscribe()
    }
}
