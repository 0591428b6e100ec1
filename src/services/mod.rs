mod bcrypt_password_service;
mod error;
mod jwt_token_service;
mod local_storage;
mod supabase_storage;

pub use bcrypt_password_service::BcryptPasswordService;
pub use error::StorageError;
pub use jwt_token_service::JwtTokenService;
pub use local_storage::LocalStorageService;
pub use supabase_storage::SupabaseStorageService;

use std::sync::Arc;

use crate::{
    application::services::StorageService,
    domain::config::app::{StorageConfig, StorageProvider},
};

pub fn create_storage_service(
    config: &StorageConfig,
) -> Result<Arc<dyn StorageService>, StorageError> {
    match config.provider {
        StorageProvider::Local => {
            let service = LocalStorageService::new(&config.upload_dir);
            Ok(Arc::new(service))
        }
        StorageProvider::Supabase => {
            let supabase_secrets = config.supabase.as_ref().ok_or_else(|| {
                StorageError::InvalidCredentials("Supabase secrets not found".to_string())
            })?;

            let service = SupabaseStorageService::new(supabase_secrets.clone());
            Ok(Arc::new(service))
        }
    }
}
