mod menu_service;
mod preview_refresher;
mod preview_signal;

pub use menu_service::{MenuService, MenuSource};
pub use preview_refresher::PreviewRefresher;
pub use preview_signal::{PreviewMessage, PreviewSignal};
