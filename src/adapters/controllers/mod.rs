pub mod file_controller;
pub mod health_controller;
pub mod login_controller;
pub mod user_controller;
