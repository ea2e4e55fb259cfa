#[cfg(test)]
#[path = "attachment_test.rs"]
mod tests;

use std::fs;
use std::path;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use url::Url;
use uuid::Uuid;

pub const JSON_MIME_TYPE: &str = "application/json";

/// A file picked by the user that has not been sent yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedFile {
    pub path: path::PathBuf,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl StagedFile {
    /// Only files with a `.json` extension, any casing, qualify.
    pub fn is_json_named(path: &path::Path) -> bool {
        return path
            .extension()
            .map(|ext| return ext.to_string_lossy().eq_ignore_ascii_case("json"))
            .unwrap_or(false);
    }

    pub fn from_path(path: &path::Path) -> StagedFile {
        let name = path
            .file_name()
            .map(|name| return name.to_string_lossy().to_string())
            .unwrap_or_else(|| return path.to_string_lossy().to_string());

        let size = match fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(err) => {
                tracing::warn!(path = ?path, error = ?err, "Unable to read staged file metadata");
                0
            }
        };

        return StagedFile {
            path: path.to_path_buf(),
            name,
            size,
            mime_type: JSON_MIME_TYPE.to_string(),
        };
    }
}

/// Display-only reference to a file that was sent along with a message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    /// `file://` URI to the original location. Only meaningful while the
    /// file still exists.
    pub handle: String,
}

impl FileAttachment {
    pub fn from_staged(file: &StagedFile) -> FileAttachment {
        let absolute = fs::canonicalize(&file.path).unwrap_or_else(|_| return file.path.clone());
        let handle = Url::from_file_path(&absolute)
            .map(|url| return url.to_string())
            .unwrap_or_else(|_| return format!("file://{}", absolute.to_string_lossy()));

        return FileAttachment {
            id: Uuid::new_v4().to_string(),
            name: file.name.to_string(),
            size: file.size,
            mime_type: file.mime_type.to_string(),
            handle,
        };
    }

    pub fn display_size(&self) -> String {
        return format_size(self.size);
    }
}

pub fn format_size(size: u64) -> String {
    if size < 1024 {
        return format!("{size} B");
    }

    let kb = size as f64 / 1024.0;
    if kb < 1024.0 {
        return format!("{kb:.1} KB");
    }

    return format!("{:.1} MB", kb / 1024.0);
}
