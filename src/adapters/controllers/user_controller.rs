use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::user_dto::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest},
        state::AppState,
    },
    application::{dto::user_dto::UserDTO, error::ApplicationError},
    domain::models::{identity::AuthenticatedUser, user::User},
};

/// Password given to users created by an administrator without one.
const DEFAULT_PASSWORD: &str = "123456";

pub struct UserController;

impl UserController {
    /// GET /api/user
    pub async fn get_users(
        State(app_state): State<AppState>,
    ) -> Result<Json<Vec<User>>, ApplicationError> {
        let users = app_state.user_repository.list_users().await?;
        Ok(Json(users))
    }

    /// POST /api/user
    pub async fn create_user(
        State(app_state): State<AppState>,
        Extension(caller): Extension<AuthenticatedUser>,
        Json(body): Json<CreateUserRequest>,
    ) -> Result<(StatusCode, Json<User>), ApplicationError> {
        let password = body
            .password
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

        let user = Self::register(&app_state, body, &password).await?;
        info!("User {} created user {}", caller.id, user.id);
        Ok((StatusCode::CREATED, Json(user)))
    }

    /// POST /api/signup
    pub async fn signup(
        State(app_state): State<AppState>,
        Json(body): Json<CreateUserRequest>,
    ) -> Result<(StatusCode, Json<User>), ApplicationError> {
        let password = body
            .password
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ApplicationError::BadRequest("password is required".to_string()))?;

        let user = Self::register(&app_state, body, &password).await?;
        info!("User {} signed up", user.id);
        Ok((StatusCode::CREATED, Json(user)))
    }

    async fn register(
        app_state: &AppState,
        body: CreateUserRequest,
        password: &str,
    ) -> Result<User, ApplicationError> {
        let username = body
            .username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ApplicationError::BadRequest("username is required".to_string()))?;

        let password_hash = app_state.password_service.hash(password).await?;

        let user_dto = UserDTO {
            id: 0,
            username: Some(username),
            password_hash: Some(password_hash),
            nickname: body.nickname,
            email: body.email,
            phone: body.phone,
            address: body.address,
        };
        app_state.user_repository.create_user(user_dto).await
    }

    /// PUT /api/user/{id}
    ///
    /// Profile fields only; the password hash is never touched here.
    pub async fn update_user(
        State(app_state): State<AppState>,
        Extension(caller): Extension<AuthenticatedUser>,
        Path(user_id): Path<i32>,
        Json(body): Json<UpdateUserRequest>,
    ) -> Result<Json<User>, ApplicationError> {
        let username = match body.username {
            Some(username) if username.trim().is_empty() => {
                return Err(ApplicationError::BadRequest(
                    "username cannot be empty".to_string(),
                ))
            }
            Some(username) => Some(username.trim().to_string()),
            None => None,
        };

        let mut user_dto = UserDTO::for_update(user_id);
        user_dto.username = username;
        user_dto.nickname = body.nickname;
        user_dto.email = body.email;
        user_dto.phone = body.phone;
        user_dto.address = body.address;

        let user = app_state.user_repository.update_user(user_dto).await?;
        info!("User {} updated user {}", caller.id, user_id);
        Ok(Json(user))
    }

    /// DELETE /api/user/{id}
    ///
    /// Removes the user's file records with it and then their stored bytes.
    pub async fn delete_user(
        State(app_state): State<AppState>,
        Extension(caller): Extension<AuthenticatedUser>,
        Path(user_id): Path<i32>,
    ) -> Result<StatusCode, ApplicationError> {
        let owned_files = app_state
            .file_repository
            .list_files_by_owner(user_id)
            .await?;

        app_state.user_repository.delete_user(user_id).await?;
        info!(
            "User {} deleted user {} ({} files)",
            caller.id,
            user_id,
            owned_files.len()
        );

        for file in owned_files {
            if let Err(e) = app_state.storage_service.delete(&file.storage_key()).await {
                warn!("Could not remove stored bytes of file {}: {:?}", file.id, e);
            }
        }

        Ok(StatusCode::NO_CONTENT)
    }

    /// GET /api/user/one
    pub async fn get_current_user(
        State(app_state): State<AppState>,
        Extension(caller): Extension<AuthenticatedUser>,
    ) -> Result<Json<User>, ApplicationError> {
        let user = app_state.user_repository.get_user(caller.id).await?;
        Ok(Json(user))
    }

    /// GET /api/user/count
    pub async fn count_users(
        State(app_state): State<AppState>,
    ) -> Result<Json<i64>, ApplicationError> {
        let count = app_state.user_repository.count_users().await?;
        Ok(Json(count))
    }

    /// PUT /api/user/password
    ///
    /// A candidate equal to the current password is rejected instead of stored.
    pub async fn change_password(
        State(app_state): State<AppState>,
        Extension(caller): Extension<AuthenticatedUser>,
        Json(body): Json<ChangePasswordRequest>,
    ) -> Result<StatusCode, ApplicationError> {
        if body.password.is_empty() {
            return Err(ApplicationError::BadRequest(
                "password is required".to_string(),
            ));
        }

        let user = app_state.user_repository.get_user(caller.id).await?;

        let same_as_current = app_state
            .password_service
            .verify(&body.password, &user.password_hash)
            .await?;
        if same_as_current {
            return Err(ApplicationError::BadRequest(
                "new password is the same as the old password".to_string(),
            ));
        }

        let mut user_dto = UserDTO::for_update(user.id);
        user_dto.password_hash = Some(app_state.password_service.hash(&body.password).await?);
        app_state.user_repository.update_user(user_dto).await?;

        info!("User {} changed their password", user.id);
        Ok(StatusCode::OK)
    }
}
