use serde::Deserialize;
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::application::dto::user_dto::UserDTO;

impl FromRow<'_, PgRow> for UserDTO {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(UserDTO {
            id: row.try_get("id")?,
            username: Some(row.try_get("username")?),
            password_hash: Some(row.try_get("password_hash")?),
            nickname: row.try_get("nickname")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
        })
    }
}

/// Body of `POST /api/user` and `POST /api/signup`.
#[derive(Debug, Deserialize, Default)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Body of `PUT /api/user/{id}`. Unknown fields (including `id`) are ignored.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}
