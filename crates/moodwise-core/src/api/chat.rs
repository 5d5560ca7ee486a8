//! Typed helpers for the mood chat endpoints.

use tracing::info;

use crate::models::{ChatMessage, ChatReply, ChatRequest, Conversation, SavedConversation};

use super::{ApiClient, ApiError};

const CHAT_PATH: &str = "/api/chat";
const SAVE_CONVERSATION_PATH: &str = "/api/save-conversation";
const CONVERSATIONS_PATH: &str = "/api/conversations";

impl ApiClient {
    /// Send `message` with the turns so far and get the assistant's answer.
    pub async fn chat(&self, message: &str, history: &[ChatMessage]) -> Result<ChatReply, ApiError> {
        let request = ChatRequest {
            message,
            conversation_history: history,
        };
        let response = self.post(CHAT_PATH, &request).await?;
        Self::parse_json(response).await
    }

    /// Store a finished conversation for the current user
    pub async fn save_conversation(&self, messages: &[ChatMessage]) -> Result<SavedConversation, ApiError> {
        let response = self.post(SAVE_CONVERSATION_PATH, messages).await?;
        let saved: SavedConversation = Self::parse_json(response).await?;
        info!(id = %saved.id, turns = messages.len(), "Saved conversation");
        Ok(saved)
    }

    pub async fn conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        let response = self.get(CONVERSATIONS_PATH).await?;
        Self::parse_json(response).await
    }
}
