use async_trait::async_trait;
use sqlx::{query_as, QueryBuilder};

use crate::{
    application::{
        dto::file_dto::FileDTO, error::ApplicationError,
        repositories::file_repository::FileRepository,
    },
    domain::models::file::File,
};

pub struct PgFileRepository {
    pool: sqlx::PgPool,
}

impl PgFileRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn create_file(&self, file: FileDTO) -> Result<File, ApplicationError> {
        let owner_id = file.owner_id.ok_or_else(|| {
            ApplicationError::InternalError("File record created without owner".to_string())
        })?;

        let query = r#"
            INSERT INTO application.files (filename, filetype, filesize, open_download, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
        "#;

        let new_file: File = file.into();

        let created: FileDTO = query_as::<_, FileDTO>(query)
            .bind(&new_file.filename)
            .bind(&new_file.filetype)
            .bind(new_file.filesize)
            .bind(new_file.open_download)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(created.into())
    }

    async fn get_file(&self, id: i32) -> Result<File, ApplicationError> {
        let query = "SELECT * FROM application.files WHERE id = $1";

        let fetched: FileDTO = query_as::<_, FileDTO>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?
            .ok_or(ApplicationError::NotFound)?;

        Ok(fetched.into())
    }

    async fn list_visible_files(&self, user_id: i32) -> Result<Vec<File>, ApplicationError> {
        let query = r#"
            SELECT * FROM application.files
            WHERE user_id = $1 OR open_download = TRUE
            ORDER BY id
        "#;

        let rows: Vec<FileDTO> = query_as::<_, FileDTO>(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(|dto| dto.into()).collect())
    }

    async fn list_files_by_owner(&self, owner_id: i32) -> Result<Vec<File>, ApplicationError> {
        let query = "SELECT * FROM application.files WHERE user_id = $1 ORDER BY id";

        let rows: Vec<FileDTO> = query_as::<_, FileDTO>(query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(|dto| dto.into()).collect())
    }

    async fn update_file(&self, file: FileDTO) -> Result<File, ApplicationError> {
        if file.is_empty_update() {
            return self.get_file(file.id).await;
        }

        let mut builder = QueryBuilder::new("UPDATE application.files SET ");
        let mut separated = builder.separated(", ");

        if let Some(filename) = &file.filename {
            separated.push("filename = ");
            separated.push_bind_unseparated(filename);
        }
        if file.filetype.is_some() {
            separated.push("filetype = ");
            separated.push_bind_unseparated(&file.filetype);
        }
        if let Some(filesize) = file.filesize {
            separated.push("filesize = ");
            separated.push_bind_unseparated(filesize);
        }
        if let Some(open_download) = file.open_download {
            separated.push("open_download = ");
            separated.push_bind_unseparated(open_download);
        }
        if let Some(owner_id) = file.owner_id {
            separated.push("user_id = ");
            separated.push_bind_unseparated(owner_id);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(file.id);
        builder.push(" RETURNING *");

        let query = builder.build_query_as::<FileDTO>();

        let updated = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?
            .ok_or(ApplicationError::NotFound)?;

        Ok(updated.into())
    }

    async fn delete_file(&self, id: i32) -> Result<File, ApplicationError> {
        let query = "DELETE FROM application.files WHERE id = $1 RETURNING *";

        let deleted: FileDTO = query_as::<_, FileDTO>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?
            .ok_or(ApplicationError::NotFound)?;

        Ok(deleted.into())
    }

    async fn count_files(&self) -> Result<i64, ApplicationError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM application.files")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(count)
    }

    async fn list_file_types(&self) -> Result<Vec<String>, ApplicationError> {
        let query = r#"
            SELECT filetype FROM application.files
            WHERE filetype IS NOT NULL
            GROUP BY filetype
            ORDER BY filetype
        "#;

        let rows: Vec<(String,)> = sqlx::query_as(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(|(filetype,)| filetype).collect())
    }
}
