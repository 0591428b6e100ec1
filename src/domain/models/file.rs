use serde::Serialize;

/// Stored file record. The owner is kept server-side only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct File {
    pub id: i32,
    pub filename: String,
    pub filetype: Option<String>,
    pub filesize: i64,
    #[serde(rename = "openDownload")]
    pub open_download: bool,
    #[serde(skip_serializing)]
    pub owner_id: i32,
}

impl File {
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.owner_id == user_id
    }

    /// A file is visible to its owner, and to everyone once it is opened for download.
    pub fn is_visible_to(&self, user_id: i32) -> bool {
        self.is_owned_by(user_id) || self.open_download
    }

    pub fn storage_key(&self) -> String {
        storage_key(self.id, &self.filename)
    }
}

/// Composite storage name `<id>_<filename>`, unique even for duplicate original names.
pub fn storage_key(id: i32, filename: &str) -> String {
    format!("{}_{}", id, filename)
}

/// Reduces a client supplied filename to its last path component.
///
/// Returns `None` when nothing usable is left (empty, `.` or `..`) or when
/// the name carries control characters, which cannot go into a header.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let name = raw
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." || name.contains(char::is_control) {
        None
    } else {
        Some(name.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

impl FileData {
    pub fn new(content: Vec<u8>, filename: String, mime_type: String) -> Self {
        Self {
            content,
            filename,
            mime_type,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}
