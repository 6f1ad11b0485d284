mod category;

pub use category::{Category, NamePosition};
