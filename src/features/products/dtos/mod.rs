pub mod product_dto;

pub use product_dto::{CreateProductDto, NewProduct, ProductListQuery, ProductPatch, UpdateProductDto};
