mod public_menu_dto;

pub use public_menu_dto::{PublicCategoryDto, PublicMenuDto, PublicProductDto};
