//! Preview surface support
//!
//! The admin side publishes a refresh signal after every successful
//! mutation; preview frames subscribe over SSE and refetch the public menu.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use handlers::PreviewState;
pub use services::{MenuService, PreviewMessage, PreviewRefresher, PreviewSignal};
