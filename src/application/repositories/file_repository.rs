use async_trait::async_trait;

use crate::{
    application::{dto::file_dto::FileDTO, error::ApplicationError},
    domain::models::file::File,
};

#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn create_file(&self, file: FileDTO) -> Result<File, ApplicationError>;
    async fn get_file(&self, id: i32) -> Result<File, ApplicationError>;
    /// Files owned by `user_id` plus every file opened for download.
    async fn list_visible_files(&self, user_id: i32) -> Result<Vec<File>, ApplicationError>;
    async fn list_files_by_owner(&self, owner_id: i32) -> Result<Vec<File>, ApplicationError>;
    async fn update_file(&self, file: FileDTO) -> Result<File, ApplicationError>;
    async fn delete_file(&self, id: i32) -> Result<File, ApplicationError>;
    async fn count_files(&self) -> Result<i64, ApplicationError>;
    async fn list_file_types(&self) -> Result<Vec<String>, ApplicationError>;
}
