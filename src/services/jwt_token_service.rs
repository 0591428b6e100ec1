use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    application::{
        error::{ApplicationError, AuthError},
        services::TokenService,
    },
    domain::models::identity::TokenSubject,
};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(rename = "userForToken", default, skip_serializing_if = "Option::is_none")]
    user_for_token: Option<TokenSubject>,
    iat: u64,
    exp: u64,
}

/// HS256 bearer tokens carrying `{username, id}` under `userForToken`.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl JwtTokenService {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl_seconds,
        }
    }

    fn sign(&self, claims: &Claims) -> Result<String, ApplicationError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ApplicationError::InternalError(format!("Failed to sign token: {}", e)))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &TokenSubject) -> Result<String, ApplicationError> {
        let now = Utc::now().timestamp().max(0) as u64;
        let claims = Claims {
            user_for_token: Some(subject.clone()),
            iat: now,
            exp: now + self.ttl_seconds,
        };
        self.sign(&claims)
    }

    fn decode(&self, token: &str) -> Result<TokenSubject, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        data.claims.user_for_token.ok_or(AuthError::MissingIdentity)
    }
}
