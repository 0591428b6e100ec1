use serde::{Deserialize, Serialize};

/// Claim bag embedded in every bearer token under `userForToken`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSubject {
    pub username: Option<String>,
    pub id: Option<i32>,
}

impl TokenSubject {
    pub fn new(username: impl Into<String>, id: i32) -> Self {
        Self {
            username: Some(username.into()),
            id: Some(id),
        }
    }
}

/// Identity resolved by the bearer guard and handed to protected handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: Option<String>,
}
