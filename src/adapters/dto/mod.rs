pub mod auth_dto;
pub mod file_dto;
pub mod user_dto;
