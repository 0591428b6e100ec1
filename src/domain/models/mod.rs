pub mod file;
pub mod identity;
pub mod user;
