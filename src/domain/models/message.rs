#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::Local;
use chrono::SecondsFormat;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

use super::Author;
use super::FileAttachment;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    Normal,
    Error,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub author: Author,
    pub text: String,
    pub created_at: String,
    pub attachments: Vec<FileAttachment>,
    mtype: MessageType,
}

/// Short identifiers are plenty for a single session's transcript.
fn create_id() -> String {
    return Uuid::new_v4()
        .to_string()
        .split('-')
        .take(2)
        .collect::<Vec<&str>>()
        .join("-");
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message::new_with_type(author, MessageType::Normal, text);
    }

    pub fn new_with_type(author: Author, mtype: MessageType, text: &str) -> Message {
        return Message {
            id: create_id(),
            author,
            text: text.to_string().replace('\t', "  "),
            created_at: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            attachments: vec![],
            mtype,
        };
    }

    pub fn with_attachments(mut self, attachments: Vec<FileAttachment>) -> Message {
        self.attachments = attachments;
        return self;
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }
}
