pub mod file_dto;
pub mod user_dto;
