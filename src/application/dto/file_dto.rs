use crate::domain::models::file::File;

#[derive(Debug, Clone, Default)]
pub struct FileDTO {
    pub id: i32,
    pub filename: Option<String>,
    pub filetype: Option<String>,
    pub filesize: Option<i64>,
    pub open_download: Option<bool>,
    pub owner_id: Option<i32>,
}

impl FileDTO {
    pub fn for_update(id: i32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn is_empty_update(&self) -> bool {
        self.filename.is_none()
            && self.filetype.is_none()
            && self.filesize.is_none()
            && self.open_download.is_none()
            && self.owner_id.is_none()
    }
}

impl From<File> for FileDTO {
    fn from(value: File) -> Self {
        FileDTO {
            id: value.id,
            filename: Some(value.filename),
            filetype: value.filetype,
            filesize: Some(value.filesize),
            open_download: Some(value.open_download),
            owner_id: Some(value.owner_id),
        }
    }
}

impl From<FileDTO> for File {
    fn from(value: FileDTO) -> Self {
        File {
            id: value.id,
            filename: value.filename.unwrap_or_default(),
            filetype: value.filetype,
            filesize: value.filesize.unwrap_or(0),
            open_download: value.open_download.unwrap_or(false),
            owner_id: value.owner_id.unwrap_or_default(),
        }
    }
}
