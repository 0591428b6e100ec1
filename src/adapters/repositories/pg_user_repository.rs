use async_trait::async_trait;
use sqlx::{query_as, QueryBuilder};

use super::map_db_error;
use crate::{
    application::{
        dto::user_dto::UserDTO, error::ApplicationError,
        repositories::user_repository::UserRepository,
    },
    domain::models::user::User,
};

const DUPLICATE_USERNAME: &str = "username already exists";

pub struct PgUserRepository {
    pool: sqlx::PgPool,
}

impl PgUserRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, user: UserDTO) -> Result<User, ApplicationError> {
        let query = r#"
            INSERT INTO application.users (username, password_hash, nickname, email, phone, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
        "#;
        let new_user: User = user.into();
        let created_user: UserDTO = query_as::<_, UserDTO>(query)
            .bind(&new_user.username)
            .bind(&new_user.password_hash)
            .bind(&new_user.nickname)
            .bind(&new_user.email)
            .bind(&new_user.phone)
            .bind(&new_user.address)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error(e, DUPLICATE_USERNAME))?;
        Ok(created_user.into())
    }

    async fn get_user(&self, id: i32) -> Result<User, ApplicationError> {
        let query = "SELECT * FROM application.users WHERE id = $1";
        let fetched_user: UserDTO = query_as::<_, UserDTO>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?
            .ok_or(ApplicationError::NotFound)?;
        Ok(fetched_user.into())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApplicationError> {
        let query = "SELECT * FROM application.users WHERE username = $1";
        let fetched_user: Option<UserDTO> = query_as::<_, UserDTO>(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(fetched_user.map(Into::into))
    }

    async fn list_users(&self) -> Result<Vec<User>, ApplicationError> {
        let query = "SELECT * FROM application.users ORDER BY id";
        let rows: Vec<UserDTO> = query_as::<_, UserDTO>(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(rows.into_iter().map(|dto| dto.into()).collect())
    }

    async fn update_user(&self, user: UserDTO) -> Result<User, ApplicationError> {
        if user.is_empty_update() {
            return self.get_user(user.id).await;
        }
        let mut builder = QueryBuilder::new("UPDATE application.users SET ");
        let mut separated = builder.separated(", ");
        if let Some(username) = &user.username {
            separated.push("username = ");
            separated.push_bind_unseparated(username);
        }
        if let Some(password_hash) = &user.password_hash {
            separated.push("password_hash = ");
            separated.push_bind_unseparated(password_hash);
        }
        if user.nickname.is_some() {
            separated.push("nickname = ");
            separated.push_bind_unseparated(&user.nickname);
        }
        if user.email.is_some() {
            separated.push("email = ");
            separated.push_bind_unseparated(&user.email);
        }
        if user.phone.is_some() {
            separated.push("phone = ");
            separated.push_bind_unseparated(&user.phone);
        }
        if user.address.is_some() {
            separated.push("address = ");
            separated.push_bind_unseparated(&user.address);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(user.id);
        builder.push(" RETURNING *");
        let query = builder.build_query_as::<UserDTO>();
        let updated_user = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, DUPLICATE_USERNAME))?
            .ok_or(ApplicationError::NotFound)?;
        Ok(updated_user.into())
    }

    async fn delete_user(&self, id: i32) -> Result<User, ApplicationError> {
        let query = "DELETE FROM application.users WHERE id = $1 RETURNING *";
        let deleted_user: UserDTO = query_as::<_, UserDTO>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?
            .ok_or(ApplicationError::NotFound)?;
        Ok(deleted_user.into())
    }

    async fn count_users(&self) -> Result<i64, ApplicationError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM application.users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(count)
    }
}
