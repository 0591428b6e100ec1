use async_trait::async_trait;

use crate::{
    application::{dto::user_dto::UserDTO, error::ApplicationError},
    domain::models::user::User,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user; the id is generated by the store.
    async fn create_user(&self, user: UserDTO) -> Result<User, ApplicationError>;
    async fn get_user(&self, id: i32) -> Result<User, ApplicationError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApplicationError>;
    async fn list_users(&self) -> Result<Vec<User>, ApplicationError>;
    async fn update_user(&self, user: UserDTO) -> Result<User, ApplicationError>;
    async fn delete_user(&self, id: i32) -> Result<User, ApplicationError>;
    async fn count_users(&self) -> Result<i64, ApplicationError>;
}
