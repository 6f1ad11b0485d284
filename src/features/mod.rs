pub mod business;
pub mod categories;
pub mod dashboard;
pub mod ordering;
pub mod preview;
pub mod products;
pub mod session;
