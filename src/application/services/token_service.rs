use crate::{
    application::error::{ApplicationError, AuthError},
    domain::models::identity::TokenSubject,
};

pub trait TokenService: Send + Sync {
    fn issue(&self, subject: &TokenSubject) -> Result<String, ApplicationError>;

    /// Verifies the signature and expiry and returns the embedded claim bag.
    fn decode(&self, token: &str) -> Result<TokenSubject, AuthError>;
}
