use axum::{extract::State, Json};
use tracing::info;

use crate::{
    adapters::{
        dto::auth_dto::{LoginRequest, LoginResponse},
        state::AppState,
    },
    application::error::ApplicationError,
    domain::models::identity::TokenSubject,
};

pub struct LoginController;

impl LoginController {
    /// POST /api/login
    ///
    /// Unknown usernames and wrong passwords produce the same response.
    pub async fn login(
        State(app_state): State<AppState>,
        Json(body): Json<LoginRequest>,
    ) -> Result<Json<LoginResponse>, ApplicationError> {
        let user = app_state
            .user_repository
            .find_by_username(body.username.trim())
            .await?
            .ok_or(ApplicationError::InvalidCredentials)?;

        let password_correct = app_state
            .password_service
            .verify(&body.password, &user.password_hash)
            .await?;
        if !password_correct {
            return Err(ApplicationError::InvalidCredentials);
        }

        let token = app_state
            .token_service
            .issue(&TokenSubject::new(user.username.clone(), user.id))?;

        info!("User {} logged in", user.id);

        Ok(Json(LoginResponse {
            token,
            username: user.username,
            nickname: user.nickname,
        }))
    }
}
