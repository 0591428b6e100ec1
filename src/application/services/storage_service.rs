use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::file::FileData};

/// Byte store addressed by composite storage keys.
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn upload(&self, key: &str, file_data: FileData) -> Result<(), ApplicationError>;
    async fn download(&self, key: &str) -> Result<Vec<u8>, ApplicationError>;
    async fn delete(&self, key: &str) -> Result<(), ApplicationError>;
    async fn rename(&self, from: &str, to: &str) -> Result<(), ApplicationError>;
}
