use serde_derive::Deserialize;
use serde_derive::Serialize;

/// One turn of the conversation as the analysis service remembers it. The
/// service is the source of truth; the client only caches the latest copy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHistoryEntry {
    pub role: String,
    pub content: String,
}

impl ChatHistoryEntry {
    pub fn new(role: &str, content: &str) -> ChatHistoryEntry {
        return ChatHistoryEntry {
            role: role.to_string(),
            content: content.to_string(),
        };
    }
}
