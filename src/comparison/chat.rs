use serde::{Deserialize, Serialize};

use crate::error::{Result, WikilensError};
use crate::llm::prompt::build_chat_messages;
use crate::llm::{ChatMessage, ChatRole};

/// Follow-up question about a finished comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Comparison text the conversation is about.
    pub prior_comparison: String,
    pub article_title: String,
    /// Language codes of the compared editions.
    pub languages: Vec<String>,
    /// Earlier turns, oldest first. Only user and assistant roles.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub new_message: String,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<()> {
        if self.prior_comparison.trim().is_empty() {
            return Err(WikilensError::InvalidRequest(
                rust_i18n::t!("chat.missing_comparison").to_string(),
            ));
        }
        if self.new_message.trim().is_empty() {
            return Err(WikilensError::InvalidRequest(
                rust_i18n::t!("chat.missing_message").to_string(),
            ));
        }
        if let Some(pos) = self
            .history
            .iter()
            .position(|m| m.role == ChatRole::System)
        {
            return Err(WikilensError::InvalidRequest(
                rust_i18n::t!("chat.system_turn_in_history", index = pos).to_string(),
            ));
        }
        Ok(())
    }

    /// `[system(context), ...history, user(new_message)]`
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        build_chat_messages(
            &self.article_title,
            &self.languages,
            &self.prior_comparison,
            &self.history,
            &self.new_message,
        )
    }
}
