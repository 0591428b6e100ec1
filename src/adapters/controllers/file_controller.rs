use axum::{
    body::Body,
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Extension, Json,
};
use tracing::{error, info, warn};

use crate::{
    adapters::{
        dto::file_dto::{FileTypesResponse, UpdateFileRequest},
        state::AppState,
    },
    application::{
        authorization::{ensure_owner, ensure_visible},
        dto::file_dto::FileDTO,
        error::{ApplicationError, AuthError},
    },
    domain::models::{
        file::{sanitize_filename, storage_key, File, FileData},
        identity::AuthenticatedUser,
    },
};

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

fn multipart_error(e: MultipartError) -> ApplicationError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApplicationError::PayloadTooLarge
    } else {
        warn!("Invalid multipart data: {}", e);
        ApplicationError::BadRequest("Invalid request format".to_string())
    }
}

/// `filename="..."` with quotes and backslashes escaped.
fn content_disposition(filename: &str) -> String {
    let escaped = filename.replace('\\', "\\\\").replace('"', "\\\"");
    format!("attachment; filename=\"{}\"", escaped)
}

pub struct FileController;

impl FileController {
    /// GET /api/file
    pub async fn get_files(
        State(app_state): State<AppState>,
        Extension(caller): Extension<AuthenticatedUser>,
    ) -> Result<Json<Vec<File>>, ApplicationError> {
        let files = app_state
            .file_repository
            .list_visible_files(caller.id)
            .await?;
        Ok(Json(files))
    }

    /// POST /api/file
    pub async fn upload_file(
        State(app_state): State<AppState>,
        Extension(caller): Extension<AuthenticatedUser>,
        mut multipart: Multipart,
    ) -> Result<(StatusCode, Json<File>), ApplicationError> {
        let mut file_data: Option<FileData> = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some("file") {
                continue;
            }

            let filename = field.file_name().unwrap_or_default().to_string();
            let mime_type = field
                .content_type()
                .unwrap_or(DEFAULT_MIME_TYPE)
                .to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;

            file_data = Some(FileData::new(bytes.to_vec(), filename, mime_type));
        }

        let file_data = file_data.ok_or_else(|| {
            warn!("Missing required 'file' field in upload");
            ApplicationError::BadRequest("Missing required field 'file'".to_string())
        })?;

        let file = Self::store_upload(&app_state, caller.id, file_data).await?;
        Ok((StatusCode::CREATED, Json(file)))
    }

    /// Creates the record, then writes the bytes under `<id>_<filename>`.
    ///
    /// A failed write removes the record again so no entry points at missing bytes.
    pub async fn store_upload(
        app_state: &AppState,
        owner_id: i32,
        file_data: FileData,
    ) -> Result<File, ApplicationError> {
        let filename = sanitize_filename(&file_data.filename)
            .ok_or_else(|| ApplicationError::BadRequest("Invalid filename".to_string()))?;

        // The token may outlive its user.
        match app_state.user_repository.get_user(owner_id).await {
            Err(ApplicationError::NotFound) => {
                return Err(ApplicationError::Unauthenticated(AuthError::MissingIdentity))
            }
            other => other?,
        };

        let file_dto = FileDTO {
            id: 0,
            filename: Some(filename),
            filetype: Some(file_data.mime_type.clone()),
            filesize: Some(file_data.size() as i64),
            open_download: Some(false),
            owner_id: Some(owner_id),
        };
        let file = app_state.file_repository.create_file(file_dto).await?;

        let key = file.storage_key();
        if let Err(upload_error) = app_state.storage_service.upload(&key, file_data).await {
            error!("Storing bytes for file {} failed: {:?}", file.id, upload_error);
            if let Err(e) = app_state.file_repository.delete_file(file.id).await {
                error!("Could not remove record of failed upload {}: {:?}", file.id, e);
            }
            return Err(ApplicationError::InternalError(format!(
                "upload of file {} failed",
                file.id
            )));
        }

        info!(
            "User {} uploaded file {} ({} bytes)",
            owner_id, file.id, file.filesize
        );
        Ok(file)
    }

    /// GET /api/file/{id}
    pub async fn download_file(
        State(app_state): State<AppState>,
        Extension(caller): Extension<AuthenticatedUser>,
        Path(file_id): Path<i32>,
    ) -> Result<Response, ApplicationError> {
        let file = app_state.file_repository.get_file(file_id).await?;
        ensure_visible(&file, &caller)?;

        let file_bytes = app_state.storage_service.download(&file.storage_key()).await?;

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, DEFAULT_MIME_TYPE)
            .header(header::CONTENT_LENGTH, file_bytes.len())
            .header(header::CONTENT_DISPOSITION, content_disposition(&file.filename))
            .header(header::CACHE_CONTROL, "no-cache, no-store, must-revalidate")
            .header(header::PRAGMA, "no-cache")
            .header(header::EXPIRES, "0")
            .header(
                header::ACCESS_CONTROL_EXPOSE_HEADERS,
                header::CONTENT_DISPOSITION.as_str(),
            )
            .body(Body::from(file_bytes))
            .map_err(|e| ApplicationError::InternalError(format!("Cannot build download: {}", e)))
    }

    /// PUT /api/file/{id}
    ///
    /// A new filename moves the stored object first and moves it back if the
    /// record update fails.
    pub async fn update_file(
        State(app_state): State<AppState>,
        Extension(caller): Extension<AuthenticatedUser>,
        Path(file_id): Path<i32>,
        Json(body): Json<UpdateFileRequest>,
    ) -> Result<Json<File>, ApplicationError> {
        let current = app_state.file_repository.get_file(file_id).await?;
        ensure_owner(current.owner_id, &caller)?;

        let new_filename = match body.filename {
            Some(raw) => Some(
                sanitize_filename(&raw)
                    .ok_or_else(|| ApplicationError::BadRequest("Invalid filename".to_string()))?,
            ),
            None => None,
        }
        .filter(|name| *name != current.filename);

        let mut file_dto = FileDTO::for_update(file_id);
        file_dto.filename = new_filename.clone();
        file_dto.filetype = body.filetype;
        file_dto.open_download = body.open_download;

        let Some(new_filename) = new_filename else {
            let updated = app_state.file_repository.update_file(file_dto).await?;
            return Ok(Json(updated));
        };

        let old_key = current.storage_key();
        let new_key = storage_key(file_id, &new_filename);
        app_state.storage_service.rename(&old_key, &new_key).await?;

        match app_state.file_repository.update_file(file_dto).await {
            Ok(updated) => {
                info!("User {} renamed file {} to {}", caller.id, file_id, new_key);
                Ok(Json(updated))
            }
            Err(update_error) => {
                if let Err(e) = app_state.storage_service.rename(&new_key, &old_key).await {
                    error!("Could not restore stored name of file {}: {:?}", file_id, e);
                }
                Err(update_error)
            }
        }
    }

    /// DELETE /api/file/{id}
    pub async fn delete_file(
        State(app_state): State<AppState>,
        Extension(caller): Extension<AuthenticatedUser>,
        Path(file_id): Path<i32>,
    ) -> Result<StatusCode, ApplicationError> {
        let file = app_state.file_repository.get_file(file_id).await?;
        ensure_owner(file.owner_id, &caller)?;

        app_state.file_repository.delete_file(file_id).await?;

        if let Err(e) = app_state.storage_service.delete(&file.storage_key()).await {
            warn!("Could not remove stored bytes of file {}: {:?}", file_id, e);
        }

        info!("User {} deleted file {}", caller.id, file_id);
        Ok(StatusCode::NO_CONTENT)
    }

    /// GET /api/file/count
    pub async fn count_files(
        State(app_state): State<AppState>,
    ) -> Result<Json<i64>, ApplicationError> {
        let count = app_state.file_repository.count_files().await?;
        Ok(Json(count))
    }

    /// GET /api/file/type
    pub async fn get_file_types(
        State(app_state): State<AppState>,
    ) -> Result<Json<FileTypesResponse>, ApplicationError> {
        let filetype = app_state.file_repository.list_file_types().await?;
        Ok(Json(FileTypesResponse { filetype }))
    }
}
