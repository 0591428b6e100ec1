use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::info;

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::models::file::FileData,
    services::error::StorageError,
};

/// Stores files as plain files under a single upload directory.
pub struct LocalStorageService {
    root: PathBuf,
}

impl LocalStorageService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        // keys are flat names; anything that could leave the root is refused
        let escapes_root = key.is_empty()
            || key == "."
            || key == ".."
            || key.contains(|c: char| c == '/' || c == '\\');
        if escapes_root {
            return Err(StorageError::InternalError(format!(
                "Invalid storage key: {}",
                key
            )));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn upload(&self, key: &str, file_data: FileData) -> Result<(), ApplicationError> {
        let path = self.resolve(key)?;
        fs::create_dir_all(&self.root)
            .await
            .map_err(StorageError::from)?;
        fs::write(&path, &file_data.content)
            .await
            .map_err(StorageError::from)?;

        info!(
            "Stored {} bytes for '{}' at {}",
            file_data.size(),
            file_data.filename,
            path.display()
        );
        Ok(())
    }

    async fn download(&self, key: &str) -> Result<Vec<u8>, ApplicationError> {
        let path = self.resolve(key)?;
        let bytes = fs::read(&path).await.map_err(StorageError::from)?;
        Ok(bytes)
    }

    async fn delete(&self, key: &str) -> Result<(), ApplicationError> {
        let path = self.resolve(key)?;
        fs::remove_file(&path).await.map_err(StorageError::from)?;
        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> Result<(), ApplicationError> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        fs::rename(&from, &to).await.map_err(StorageError::from)?;
        Ok(())
    }
}
