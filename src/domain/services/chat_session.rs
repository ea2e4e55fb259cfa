#[cfg(test)]
#[path = "chat_session_test.rs"]
mod tests;

use std::path::PathBuf;

use anyhow::Result;

use crate::domain::models::Author;
use crate::domain::models::Backend;
use crate::domain::models::ChatHistoryEntry;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatResponse;
use crate::domain::models::FileAttachment;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::StagedFile;

/// All chat state for one run of the client. Mutated only from the UI loop,
/// so the in-flight flag is a plain bool.
#[derive(Default)]
pub struct ChatSession {
    pub messages: Vec<Message>,
    pub chat_history: Vec<ChatHistoryEntry>,
    pub pending_text: String,
    pub staged_files: Vec<StagedFile>,
    pub waiting_for_backend: bool,
    pub show_template: bool,
}

impl ChatSession {
    /// Replaces the staged set with the JSON files of `selection`. Returns a
    /// warning when nothing in a non-empty selection could be staged.
    pub fn stage_files(&mut self, selection: &[PathBuf]) -> Option<String> {
        self.staged_files = selection
            .iter()
            .filter(|path| return StagedFile::is_json_named(path))
            .map(|path| return StagedFile::from_path(path))
            .collect();

        if !selection.is_empty() && self.staged_files.is_empty() {
            return Some("Only .json log files can be attached.".to_string());
        }

        tracing::debug!(count = self.staged_files.len(), "Staged files");
        return None;
    }

    pub fn unstage_file(&mut self, index: usize) {
        if index < self.staged_files.len() {
            self.staged_files.remove(index);
        }
    }

    pub fn set_pending_text(&mut self, text: &str) {
        self.pending_text = text.to_string();
    }

    pub fn toggle_template(&mut self) {
        self.show_template = !self.show_template;
    }

    pub fn can_send(&self) -> bool {
        if self.waiting_for_backend {
            return false;
        }

        return !self.pending_text.trim().is_empty() || !self.staged_files.is_empty();
    }

    /// Records the user's message and hands back the request to submit. The
    /// session stays in flight until `complete_send` is called.
    pub fn prepare_send(&mut self) -> Option<ChatRequest> {
        if !self.can_send() {
            return None;
        }

        let text = self.pending_text.trim().to_string();
        let attachments = self
            .staged_files
            .iter()
            .map(FileAttachment::from_staged)
            .collect::<Vec<FileAttachment>>();

        // Only a single file is forwarded per request. Staging only keeps JSON
        // files, so the first one is the one to send.
        let file = self.staged_files.first().cloned();

        self.messages
            .push(Message::new(Author::User, &text).with_attachments(attachments));
        self.pending_text = "".to_string();
        self.staged_files = vec![];
        self.waiting_for_backend = true;

        return Some(ChatRequest {
            message: text,
            chat_history: self.chat_history.clone(),
            file,
        });
    }

    pub fn complete_send(&mut self, res: Result<ChatResponse>) {
        self.waiting_for_backend = false;

        let response = match res {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = ?err, "Chat request failed");
                self.push_failure(&format!("{err:#}"));
                return;
            }
        };

        if let Some(reason) = response.error_reason() {
            tracing::error!(error = reason, "Analysis service returned an error");
            self.push_failure(reason);
            return;
        }

        self.messages
            .push(Message::new(Author::Bot, &response.message));
        // The service owns the conversation, never merge.
        self.chat_history = response.chat_history;
    }

    /// Runs a full exchange. Failures end up in the transcript, never in the
    /// return value.
    pub async fn send(&mut self, backend: &dyn Backend) -> bool {
        let request = match self.prepare_send() {
            Some(request) => request,
            None => return false,
        };

        let res = backend.submit(request).await;
        self.complete_send(res);

        return true;
    }

    /// Text of the 1-based transcript entry, or of the latest bot reply.
    pub fn message_text(&self, position: Option<usize>) -> Option<String> {
        if let Some(pos) = position {
            return self
                .messages
                .get(pos.checked_sub(1)?)
                .map(|msg| return msg.text.to_string());
        }

        return self
            .messages
            .iter()
            .rev()
            .find(|msg| return msg.author == Author::Bot)
            .map(|msg| return msg.text.to_string());
    }

    fn push_failure(&mut self, reason: &str) {
        self.messages.push(Message::new_with_type(
            Author::Bot,
            MessageType::Error,
            &format!("Error: {reason}"),
        ));
    }
}
