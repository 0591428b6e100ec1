use async_trait::async_trait;

use crate::application::{error::ApplicationError, services::PasswordService};

/// Salted bcrypt hashes, computed off the async runtime.
pub struct BcryptPasswordService {
    cost: u32,
}

impl BcryptPasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

#[async_trait]
impl PasswordService for BcryptPasswordService {
    async fn hash(&self, password: &str) -> Result<String, ApplicationError> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| ApplicationError::InternalError(format!("Hashing task failed: {}", e)))?
            .map_err(|e| ApplicationError::InternalError(format!("Hashing failed: {}", e)))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, ApplicationError> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| ApplicationError::InternalError(format!("Verify task failed: {}", e)))?;

        // a stored hash that does not parse can never match
        Ok(verified.unwrap_or(false))
    }
}
