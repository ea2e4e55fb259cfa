use std::path::PathBuf;

use super::ChatRequest;

pub enum Action {
    BackendRequest(ChatRequest),
    CopyText(String),
    ExportTemplate(PathBuf),
}
