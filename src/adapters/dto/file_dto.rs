use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::application::dto::file_dto::FileDTO;

impl FromRow<'_, PgRow> for FileDTO {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(FileDTO {
            id: row.try_get("id")?,
            filename: Some(row.try_get("filename")?),
            filetype: row.try_get("filetype")?,
            filesize: Some(row.try_get("filesize")?),
            open_download: Some(row.try_get("open_download")?),
            owner_id: Some(row.try_get("user_id")?),
        })
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateFileRequest {
    pub filename: Option<String>,
    pub filetype: Option<String>,
    #[serde(rename = "openDownload")]
    pub open_download: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct FileTypesResponse {
    pub filetype: Vec<String>,
}
