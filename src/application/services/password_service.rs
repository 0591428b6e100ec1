use async_trait::async_trait;

use crate::application::error::ApplicationError;

#[async_trait]
pub trait PasswordService: Send + Sync {
    /// Hashes with a freshly generated salt.
    async fn hash(&self, password: &str) -> Result<String, ApplicationError>;
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, ApplicationError>;
}
