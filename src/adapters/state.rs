use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    application::{
        repositories::{file_repository::FileRepository, user_repository::UserRepository},
        services::{PasswordService, StorageService, TokenService},
    },
    domain::config::app::AppConfig,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub user_repository: Arc<dyn UserRepository>,
    pub file_repository: Arc<dyn FileRepository>,
    pub storage_service: Arc<dyn StorageService>,
    pub token_service: Arc<dyn TokenService>,
    pub password_service: Arc<dyn PasswordService>,
}

#[cfg(test)]
impl AppState {
    /// State over in-memory repositories and local storage rooted at `upload_dir`.
    pub fn for_tests(
        upload_dir: &std::path::Path,
    ) -> (Self, crate::adapters::repositories::memory::MemoryStore) {
        use crate::{
            adapters::repositories::memory::MemoryStore,
            services::{BcryptPasswordService, JwtTokenService, LocalStorageService},
        };

        let config = AppConfig::from_lookup(|name| match name {
            "DATABASE_URL" => Some("postgres://localhost/filehub_test".to_string()),
            "JWT_SECRET" => Some("test-secret".to_string()),
            "BCRYPT_COST" => Some("4".to_string()),
            "UPLOAD_DIR" => Some(upload_dir.display().to_string()),
            _ => None,
        })
        .expect("test config");

        let store = MemoryStore::new();
        let state = AppState {
            token_service: Arc::new(JwtTokenService::new(
                &config.jwt_secret,
                config.token_ttl_seconds,
            )),
            password_service: Arc::new(BcryptPasswordService::new(config.bcrypt_cost)),
            storage_service: Arc::new(LocalStorageService::new(upload_dir)),
            user_repository: Arc::new(store.user_repository()),
            file_repository: Arc::new(store.file_repository()),
            config: Arc::new(config),
        };
        (state, store)
    }
}
