mod business;

pub use business::Business;
