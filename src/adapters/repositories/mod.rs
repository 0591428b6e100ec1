mod pg_file_repository;
mod pg_user_repository;

#[cfg(test)]
pub mod memory;

pub use pg_file_repository::PgFileRepository;
pub use pg_user_repository::PgUserRepository;

use crate::application::error::ApplicationError;

/// Maps store failures onto application errors; unique violations become conflicts.
fn map_db_error(error: sqlx::Error, conflict_message: &str) -> ApplicationError {
    match error {
        sqlx::Error::RowNotFound => ApplicationError::NotFound,
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            ApplicationError::Conflict(conflict_message.to_string())
        }
        other => ApplicationError::DatabaseError(other.to_string()),
    }
}
