//! Menu ordering core
//!
//! - `models`: ordered snapshot of one business's menu and the pure list
//!   transformations over it
//! - `drag`: gesture handling that resolves drops into move intents
//! - `services`: snapshot loading and the optimistic reconciler

pub mod drag;
pub mod models;
pub mod services;

pub use services::{Outcome, Reconciler, Reconciliation};
