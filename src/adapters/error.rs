use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::{ApplicationError, AuthError};

pub const TOKEN_ERROR_MESSAGE: &str = "token missing or invalid";
pub const LOGIN_ERROR_MESSAGE: &str = "invalid username or password";

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApplicationError::NotFound => {
                warn!("Resource not found");
                (StatusCode::NOT_FOUND, "Resource not found".to_string())
            }
            ApplicationError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            ApplicationError::Conflict(msg) => {
                warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, msg)
            }
            ApplicationError::Unauthenticated(ref reason) => {
                match reason {
                    AuthError::MissingToken => warn!("Request without bearer token"),
                    AuthError::InvalidToken(detail) => warn!("Rejected bearer token: {}", detail),
                    AuthError::MissingIdentity => warn!("Bearer token carries no user id"),
                }
                (StatusCode::UNAUTHORIZED, TOKEN_ERROR_MESSAGE.to_string())
            }
            ApplicationError::InvalidCredentials => {
                warn!("Failed login attempt");
                (StatusCode::UNAUTHORIZED, LOGIN_ERROR_MESSAGE.to_string())
            }
            ApplicationError::Forbidden => {
                warn!("Forbidden access attempt");
                return StatusCode::FORBIDDEN.into_response();
            }
            ApplicationError::PayloadTooLarge => {
                warn!("File too large");
                (StatusCode::PAYLOAD_TOO_LARGE, "File too large".to_string())
            }
            ApplicationError::InternalError(ref msg) => {
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApplicationError::DatabaseError(ref msg) => {
                error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
