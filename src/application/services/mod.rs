mod password_service;
mod storage_service;
mod token_service;

pub use password_service::PasswordService;
pub use storage_service::StorageService;
pub use token_service::TokenService;
