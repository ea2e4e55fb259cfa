use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::anyhow;
use anyhow::Result;
use async_trait::async_trait;

use super::ChatSession;
use crate::domain::models::Author;
use crate::domain::models::Backend;
use crate::domain::models::ChatHistoryEntry;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatResponse;
use crate::domain::models::MessageType;

enum Reply {
    Success(ChatResponse),
    Failure(String),
}

struct MockBackend {
    reply: Reply,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockBackend {
    fn replying(response: ChatResponse) -> MockBackend {
        return MockBackend {
            reply: Reply::Success(response),
            requests: Mutex::new(vec![]),
        };
    }

    fn failing(reason: &str) -> MockBackend {
        return MockBackend {
            reply: Reply::Failure(reason.to_string()),
            requests: Mutex::new(vec![]),
        };
    }

    fn requests(&self) -> Vec<ChatRequest> {
        return self.requests.lock().unwrap().clone();
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn submit(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Reply::Success(response) => return Ok(response.clone()),
            Reply::Failure(reason) => return Err(anyhow!(reason.to_string())),
        }
    }
}

fn paths(names: &[&str]) -> Vec<PathBuf> {
    return names.iter().map(PathBuf::from).collect();
}

fn staged_names(session: &ChatSession) -> Vec<String> {
    return session
        .staged_files
        .iter()
        .map(|file| return file.name.to_string())
        .collect();
}

fn two_turn_history() -> Vec<ChatHistoryEntry> {
    return vec![
        ChatHistoryEntry::new("user", "show slow queries"),
        ChatHistoryEntry::new("assistant", "Query X is slow"),
    ];
}

mod stage_files {
    use super::*;

    #[test]
    fn it_stages_json_files() {
        let mut session = ChatSession::default();
        let warning = session.stage_files(&paths(&["a.json", "b.JSON"]));

        assert!(warning.is_none());
        assert_eq!(staged_names(&session), vec!["a.json", "b.JSON"]);
    }

    #[test]
    fn it_replaces_instead_of_merging() {
        let mut session = ChatSession::default();
        session.stage_files(&paths(&["a.json", "b.json"]));
        session.stage_files(&paths(&["c.json"]));

        assert_eq!(staged_names(&session), vec!["c.json"]);
    }

    #[test]
    fn it_drops_non_json_files_from_mixed_selections() {
        let mut session = ChatSession::default();
        let warning = session.stage_files(&paths(&["notes.txt", "a.json", "dump.csv"]));

        assert!(warning.is_none());
        assert_eq!(staged_names(&session), vec!["a.json"]);
    }

    #[test]
    fn it_warns_when_nothing_is_json() {
        let mut session = ChatSession::default();
        session.stage_files(&paths(&["a.json"]));
        let warning = session.stage_files(&paths(&["notes.txt"]));

        assert!(warning.is_some());
        assert!(session.staged_files.is_empty());
    }

    #[test]
    fn it_clears_on_empty_selection_without_warning() {
        let mut session = ChatSession::default();
        session.stage_files(&paths(&["a.json"]));
        let warning = session.stage_files(&[]);

        assert!(warning.is_none());
        assert!(session.staged_files.is_empty());
    }

    #[test]
    fn it_unstages_by_index() {
        let mut session = ChatSession::default();
        session.stage_files(&paths(&["a.json", "b.json", "c.json"]));
        session.unstage_file(1);

        assert_eq!(staged_names(&session), vec!["a.json", "c.json"]);
    }

    #[test]
    fn it_ignores_out_of_bounds_unstage() {
        let mut session = ChatSession::default();
        session.stage_files(&paths(&["a.json"]));
        session.unstage_file(1);
        session.unstage_file(usize::MAX);

        assert_eq!(staged_names(&session), vec!["a.json"]);
    }
}

mod send {
    use super::*;

    #[tokio::test]
    async fn it_is_a_noop_without_text_or_files() {
        let backend = MockBackend::replying(ChatResponse::default());
        let mut session = ChatSession::default();
        session.set_pending_text("   \n ");

        assert!(!session.send(&backend).await);
        assert!(session.messages.is_empty());
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn it_stays_blocked_after_rejected_selection() {
        let backend = MockBackend::replying(ChatResponse::default());
        let mut session = ChatSession::default();
        assert!(session.stage_files(&paths(&["notes.txt"])).is_some());

        assert!(!session.can_send());
        assert!(!session.send(&backend).await);
        assert!(session.messages.is_empty());
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn it_is_a_noop_while_in_flight() {
        let backend = MockBackend::replying(ChatResponse::default());
        let mut session = ChatSession::default();
        session.set_pending_text("first");
        assert!(session.prepare_send().is_some());

        session.set_pending_text("second");
        assert!(session.prepare_send().is_none());
        assert!(!session.send(&backend).await);

        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.pending_text, "second");
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn it_exchanges_a_message() {
        let backend = MockBackend::replying(ChatResponse {
            message: "Query X is slow".to_string(),
            chat_history: two_turn_history(),
            error: None,
        });
        let mut session = ChatSession::default();
        session.set_pending_text("show slow queries");

        assert!(session.send(&backend).await);

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].message, "show slow queries");
        assert!(requests[0].chat_history.is_empty());
        assert!(requests[0].file.is_none());

        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].author, Author::User);
        assert_eq!(session.messages[0].text, "show slow queries");
        assert_eq!(session.messages[1].author, Author::Bot);
        assert_eq!(session.messages[1].text, "Query X is slow");
        assert_eq!(session.messages[1].message_type(), MessageType::Normal);
        assert_eq!(session.chat_history, two_turn_history());
        assert!(!session.waiting_for_backend);
        assert!(session.pending_text.is_empty());
    }

    #[tokio::test]
    async fn it_replaces_history_wholesale() {
        let replacement = vec![ChatHistoryEntry::new("assistant", "fresh start")];
        let backend = MockBackend::replying(ChatResponse {
            message: "ok".to_string(),
            chat_history: replacement.clone(),
            error: None,
        });
        let mut session = ChatSession {
            chat_history: two_turn_history(),
            ..ChatSession::default()
        };
        session.set_pending_text("again");

        session.send(&backend).await;

        assert_eq!(backend.requests()[0].chat_history, two_turn_history());
        assert_eq!(session.chat_history, replacement);
    }

    #[tokio::test]
    async fn it_forwards_the_first_staged_file_only() {
        let backend = MockBackend::replying(ChatResponse::default());
        let mut session = ChatSession::default();
        session.stage_files(&paths(&["first.json", "second.json"]));

        assert!(session.send(&backend).await);

        let requests = backend.requests();
        assert_eq!(requests[0].message, "");
        assert_eq!(requests[0].file.as_ref().unwrap().name, "first.json");

        let user_message = &session.messages[0];
        assert_eq!(user_message.attachments.len(), 2);
        assert_eq!(user_message.attachments[1].name, "second.json");
        assert!(session.staged_files.is_empty());
    }

    #[tokio::test]
    async fn it_forwards_the_first_json_file_of_a_mixed_selection() {
        let backend = MockBackend::replying(ChatResponse::default());
        let mut session = ChatSession::default();
        session.stage_files(&paths(&["notes.txt", "slow.JSON", "b.json"]));

        assert!(session.send(&backend).await);

        let requests = backend.requests();
        assert_eq!(requests[0].file.as_ref().unwrap().name, "slow.JSON");
        assert_eq!(session.messages[0].attachments.len(), 2);
    }

    #[tokio::test]
    async fn it_reports_transport_failures_in_the_transcript() {
        let backend = MockBackend::failing("connection refused");
        let mut session = ChatSession {
            chat_history: two_turn_history(),
            ..ChatSession::default()
        };
        session.stage_files(&paths(&["a.json"]));
        session.set_pending_text("show slow queries");

        assert!(session.send(&backend).await);

        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].author, Author::User);
        assert_eq!(session.messages[1].author, Author::Bot);
        assert_eq!(session.messages[1].message_type(), MessageType::Error);
        assert_eq!(session.messages[1].text, "Error: connection refused");
        assert_eq!(session.chat_history, two_turn_history());
        assert!(session.staged_files.is_empty());
        assert!(!session.waiting_for_backend);
    }

    #[tokio::test]
    async fn it_treats_error_fields_as_failures() {
        let backend = MockBackend::replying(ChatResponse {
            message: "ignored".to_string(),
            chat_history: vec![ChatHistoryEntry::new("assistant", "ignored")],
            error: Some("log file is malformed".to_string()),
        });
        let mut session = ChatSession::default();
        session.set_pending_text("analyze");

        session.send(&backend).await;

        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[1].message_type(), MessageType::Error);
        assert_eq!(session.messages[1].text, "Error: log file is malformed");
        assert!(session.chat_history.is_empty());
        assert!(!session.waiting_for_backend);
    }

    #[tokio::test]
    async fn it_ignores_blank_error_fields() {
        let backend = MockBackend::replying(ChatResponse {
            message: "fine".to_string(),
            chat_history: two_turn_history(),
            error: Some("  ".to_string()),
        });
        let mut session = ChatSession::default();
        session.set_pending_text("analyze");

        session.send(&backend).await;

        assert_eq!(session.messages[1].text, "fine");
        assert_eq!(session.messages[1].message_type(), MessageType::Normal);
        assert_eq!(session.chat_history, two_turn_history());
    }
}

mod message_text {
    use super::*;

    #[test]
    fn it_returns_latest_bot_reply_by_default() {
        let mut session = ChatSession::default();
        assert!(session.message_text(None).is_none());

        session.set_pending_text("one");
        session.prepare_send();
        session.complete_send(Ok(ChatResponse {
            message: "reply one".to_string(),
            ..ChatResponse::default()
        }));

        assert_eq!(session.message_text(None), Some("reply one".to_string()));
        assert_eq!(session.message_text(Some(1)), Some("one".to_string()));
        assert!(session.message_text(Some(0)).is_none());
        assert!(session.message_text(Some(3)).is_none());
    }
}

#[test]
fn it_toggles_template_display() {
    let mut session = ChatSession::default();
    assert!(!session.show_template);
    session.toggle_template();
    assert!(session.show_template);
    session.toggle_template();
    assert!(!session.show_template);
}
