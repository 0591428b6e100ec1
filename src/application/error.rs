use thiserror::Error;

#[derive(Debug)]
pub enum ApplicationError {
    NotFound,
    InternalError(String),
    DatabaseError(String),
    BadRequest(String),
    Conflict(String),
    Unauthenticated(AuthError),
    InvalidCredentials,
    Forbidden,
    PayloadTooLarge,
}

/// Why a bearer token was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("authorization header missing or not a bearer token")]
    MissingToken,

    #[error("token could not be decoded: {0}")]
    InvalidToken(String),

    #[error("token carries no user id")]
    MissingIdentity,
}

impl From<AuthError> for ApplicationError {
    fn from(error: AuthError) -> Self {
        ApplicationError::Unauthenticated(error)
    }
}
