#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::path::PathBuf;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::BubbleList;
use super::ChatSession;
use super::Scroll;
use super::Themes;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::ChatResponse;
use crate::domain::models::LogTemplate;
use crate::domain::models::Notice;
use crate::domain::models::SlashCommand;
use crate::domain::models::DEFAULT_TEMPLATE_FILE;

pub struct AppState {
    pub bubble_list: BubbleList,
    pub last_known_height: usize,
    pub last_known_width: usize,
    pub notice: Option<Notice>,
    pub scroll: Scroll,
    pub session: ChatSession,
    pub show_help: bool,
}

impl AppState {
    pub fn new(theme_name: &str) -> Result<AppState> {
        let theme = Themes::get(theme_name)?;

        return Ok(AppState {
            bubble_list: BubbleList::new(theme),
            last_known_height: 0,
            last_known_width: 0,
            notice: None,
            scroll: Scroll::default(),
            session: ChatSession::default(),
            show_help: false,
        });
    }

    /// Stages files passed on the command line and warns early when the
    /// analysis service is down.
    pub async fn init(&mut self, backend: &BackendBox, initial_files: &[PathBuf]) {
        if !initial_files.is_empty() {
            self.stage_files(initial_files);
        }

        // Runs last so an unreachable service outranks the staging notice.
        if let Err(err) = backend.health_check().await {
            let api_url = Config::get(ConfigKey::ApiUrl);
            self.notice = Some(Notice::warning(&format!(
                "Can't reach the analysis service at {api_url} ({err}). Messages will fail until it's up."
            )));
        }
    }

    pub fn handle_backend_response(&mut self, res: Result<ChatResponse>) {
        self.session.complete_send(res);
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width.into();
        self.last_known_height = rect.height.into();
        self.sync_dependants();
    }

    /// Sends the prompt if the session allows it. Returns whether the input
    /// was consumed.
    pub fn submit_prompt(
        &mut self,
        text: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<bool> {
        self.session.set_pending_text(text);
        let request = match self.session.prepare_send() {
            Some(request) => request,
            None => return Ok(false),
        };

        self.notice = None;
        tx.send(Action::BackendRequest(request))?;
        self.sync_dependants();
        self.scroll.last();

        return Ok(true);
    }

    /// Returns `(should_break, should_continue)`. Commands never reach the
    /// transcript.
    pub fn handle_slash_commands(
        &mut self,
        input_str: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, bool)> {
        let command = match SlashCommand::parse(input_str) {
            Some(command) => command,
            None => return Ok((false, false)),
        };

        if command.is_quit() {
            return Ok((true, false));
        }

        if command.is_attach() {
            // An unquoted path with spaces still wins when it names a real
            // file.
            let raw_path = PathBuf::from(&command.raw_args);
            let selection = if !command.raw_args.is_empty() && raw_path.is_file() {
                vec![raw_path]
            } else {
                command
                    .args
                    .iter()
                    .map(PathBuf::from)
                    .collect::<Vec<PathBuf>>()
            };
            self.stage_files(&selection);
        } else if command.is_detach() {
            self.detach(command.args.first());
        } else if command.is_copy() {
            self.copy_message(command.args.first(), tx)?;
        } else if command.is_template_toggle() {
            self.session.toggle_template();
            self.show_help = false;
        } else if command.is_template_copy() {
            tx.send(Action::CopyText(LogTemplate::text()?))?;
        } else if command.is_template_export() {
            let path = command
                .args
                .get(1)
                .map(|e| return e.to_string())
                .unwrap_or_else(|| return DEFAULT_TEMPLATE_FILE.to_string());
            tx.send(Action::ExportTemplate(PathBuf::from(path)))?;
        } else if command.is_help() {
            self.show_help = !self.show_help;
            self.session.show_template = false;
        }

        return Ok((false, true));
    }

    fn stage_files(&mut self, selection: &[PathBuf]) {
        if let Some(warning) = self.session.stage_files(selection) {
            self.notice = Some(Notice::warning(&warning));
            return;
        }

        let count = self.session.staged_files.len();
        if count == 0 {
            self.notice = Some(Notice::info("Cleared staged files."));
        } else {
            self.notice = Some(Notice::info(&format!("Staged {count} file(s).")));
        }
    }

    fn detach(&mut self, arg: Option<&String>) {
        let position = arg.and_then(|e| return e.parse::<usize>().ok());
        match position {
            Some(pos) if pos >= 1 && pos <= self.session.staged_files.len() => {
                self.session.unstage_file(pos - 1);
                self.notice = None;
            }
            _ => {
                self.notice = Some(Notice::warning(
                    "Pick a staged file number, for example `/detach 1`.",
                ));
            }
        }
    }

    fn copy_message(
        &mut self,
        arg: Option<&String>,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        let position = match arg {
            Some(e) => match e.parse::<usize>() {
                Ok(pos) => Some(pos),
                Err(_) => {
                    self.notice = Some(Notice::warning(&format!("{e} is not a message number.")));
                    return Ok(());
                }
            },
            None => None,
        };

        if let Some(text) = self.session.message_text(position) {
            tx.send(Action::CopyText(text))?;
        } else {
            self.notice = Some(Notice::warning("There is no message to copy."));
        }

        return Ok(());
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.session.messages, self.last_known_width);

        self.scroll
            .set_state(self.bubble_list.len(), self.last_known_height);

        if self.session.waiting_for_backend {
            self.scroll.last();
        }
    }
}
