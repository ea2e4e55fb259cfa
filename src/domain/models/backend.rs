use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::ChatHistoryEntry;
use super::StagedFile;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub chat_history: Vec<ChatHistoryEntry>,
    pub file: Option<StagedFile>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatResponse {
    pub message: String,
    pub chat_history: Vec<ChatHistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    /// The service can report a failure inside an otherwise successful
    /// response. Blank error strings don't count.
    pub fn error_reason(&self) -> Option<&str> {
        return self
            .error
            .as_deref()
            .map(|err| return err.trim())
            .filter(|err| return !err.is_empty());
    }
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Used at startup to check the analysis service can be reached.
    async fn health_check(&self) -> Result<()>;

    /// Sends a single chat turn. The optional file is read from disk at
    /// submit time and forwarded as-is.
    ///
    /// Non-success statuses are returned as errors. A success status whose
    /// body carries an `error` field is returned as `Ok`, callers decide what
    /// to do with it.
    async fn submit(&self, request: ChatRequest) -> Result<ChatResponse>;
}

pub type BackendBox = Box<dyn Backend>;
