#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::fs;
use tokio::sync::mpsc;

use super::clipboard::ClipboardService;
use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::ChatRequest;
use crate::domain::models::Event;
use crate::domain::models::LogTemplate;
use crate::domain::models::Notice;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /attach (/f) [PATH...] - Stages JSON log files for the next message. Replaces anything staged before. Non JSON files are skipped.
- /detach (/d) [NUMBER] - Removes a staged file by its number in the staged list.
- /copy (/c) [MESSAGE_NUMBER?] - Copies a message to your clipboard. Without a number the latest reply is copied.
- /template (/t) - Shows or hides an example of the log format the analysis service expects.
- /template copy - Copies the example log format to your clipboard.
- /template export [PATH?] - Saves the example log format to a file. Defaults to ./log-template.json.
- /quit /exit (/q) - Exit.
- /help (/h) - Shows or hides this help.

HOTKEYS:
- Enter - Send your message along with any staged file.
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

/// Writes the example log template. Produces the same bytes as copying it.
pub async fn export_template(path: &Path) -> Result<()> {
    fs::write(path, LogTemplate::text()?).await?;
    return Ok(());
}

fn copy_text(text: String, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    if let Err(err) = ClipboardService::set(text) {
        tracing::warn!(error = ?err, "Unable to copy to clipboard");
        tx.send(Event::Notice(Notice::warning(&format!(
            "Unable to copy to clipboard: {err}"
        ))))?;
        return Ok(());
    }

    tx.send(Event::Notice(Notice::info("Copied to clipboard.")))?;
    return Ok(());
}

async fn export_template_notice(path: &Path, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    let path_str = path.to_string_lossy().to_string();
    if let Err(err) = export_template(path).await {
        tracing::warn!(error = ?err, path = %path_str, "Unable to export template");
        tx.send(Event::Notice(Notice::warning(&format!(
            "Unable to save template to {path_str}: {err}"
        ))))?;
        return Ok(());
    }

    tx.send(Event::Notice(Notice::info(&format!(
        "Saved template to {path_str}"
    ))))?;
    return Ok(());
}

fn backend_request(
    backend: Arc<BackendBox>,
    request: ChatRequest,
    tx: mpsc::UnboundedSender<Event>,
) {
    tokio::spawn(async move {
        let res = backend.submit(request).await;
        if tx.send(Event::BackendResponse(res)).is_err() {
            tracing::warn!("UI closed before the chat response arrived");
        }
    });
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        backend: BackendBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let backend = Arc::new(backend);

        while let Some(action) = rx.recv().await {
            match action {
                Action::BackendRequest(request) => {
                    tracing::debug!(
                        text = %request.message,
                        history = request.chat_history.len(),
                        file = ?request.file.as_ref().map(|file| return &file.name),
                        "Submitting chat request"
                    );
                    backend_request(backend.clone(), request, tx.clone());
                }
                Action::CopyText(text) => {
                    copy_text(text, &tx)?;
                }
                Action::ExportTemplate(path) => {
                    export_template_notice(&path, &tx).await?;
                }
            }
        }

        return Ok(());
    }
}
