//! Admin session scope: which business this service administers

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::SessionService;
