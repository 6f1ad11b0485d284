pub mod preview_handler;

pub use preview_handler::{
    __path_get_public_menu, __path_preview_events, get_public_menu, preview_events, PreviewState,
};
