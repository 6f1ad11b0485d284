pub mod business_dto;

pub use business_dto::UpdateBusinessDto;
