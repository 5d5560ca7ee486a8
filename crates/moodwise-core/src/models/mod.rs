//! Data models for the MoodWise Notes API.
//!
//! - `Note`, `NewNote`, `NoteUpdate`: note payloads
//! - `User`, `NewUser`, `AccessToken`: account and login payloads
//! - `ChatMessage`, `ChatReply`, `Conversation`: mood chat payloads

pub mod chat;
pub mod note;
pub mod user;

pub use chat::{ChatMessage, ChatReply, ChatRequest, Conversation, Role, SavedConversation};
pub use note::{NewNote, Note, NoteUpdate};
pub use user::{AccessToken, Message, NewUser, User};

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Accept an identifier sent either as a JSON string or a JSON number.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawId::deserialize(deserializer)?.into())
}

/// Like `string_or_number`, for identifiers that may be `null`.
pub(crate) fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}
