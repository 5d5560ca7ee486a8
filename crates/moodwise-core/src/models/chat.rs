use std::fmt;

use serde::{Deserialize, Serialize};

/// Emotion reported when the assistant reply carries no tag
pub const NEUTRAL_EMOTION: &str = "neutral";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        })
    }
}

/// One turn of a mood chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub conversation_history: &'a [ChatMessage],
}

/// Assistant answer with the emotion it detected in the user's message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub message: String,
    #[serde(default = "neutral")]
    pub emotion: String,
}

fn neutral() -> String {
    NEUTRAL_EMOTION.to_string()
}

impl ChatReply {
    /// The reply as a history entry for the next turn
    pub fn to_message(&self) -> ChatMessage {
        ChatMessage::assistant(self.message.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SavedConversation {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Conversation {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Conversation {
    /// First thing the user said, used as a title in listings
    pub fn opening_line(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_shape() {
        let history = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")];
        let request = ChatRequest {
            message: "I feel great",
            conversation_history: &history,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "message": "I feel great",
                "conversation_history": [
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "hello"}
                ]
            })
        );
    }

    #[test]
    fn test_parse_chat_reply() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"message": "That's wonderful!", "emotion": "joy"}"#).unwrap();
        assert_eq!(reply.emotion, "joy");
        assert_eq!(reply.to_message().role, Role::Assistant);

        let untagged: ChatReply = serde_json::from_str(r#"{"message": "ok"}"#).unwrap();
        assert_eq!(untagged.emotion, NEUTRAL_EMOTION);
    }

    #[test]
    fn test_parse_conversation() {
        let json = r#"{"id": "65f0", "user_id": "u1", "created_at": "2024-03-05T10:00:00",
            "messages": [{"role": "system", "content": "be kind"}, {"role": "user", "content": "rough day"}]}"#;
        let conversation: Conversation = serde_json::from_str(json).expect("Failed to parse conversation JSON");
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.opening_line(), Some("rough day"));
    }
}
