//! Inbox threads and the sample conversation

use std::collections::HashSet;

use serde::Deserialize;

use super::{ChatMessage, ChatThread, DataError};

const CHAT_JSON: &str = include_str!("mock/chat.json");

/// Inbox contents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatData {
    pub threads: Vec<ChatThread>,
    /// Conversation shown when any thread is opened
    pub transcript: Vec<ChatMessage>,
}

impl ChatData {
    /// Loads the embedded inbox
    pub fn load() -> Result<Self, DataError> {
        Self::from_json(CHAT_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let data: ChatData = serde_json::from_str(json)
            .map_err(|source| DataError::Parse { what: "chat", source })?;
        data.validate()?;
        Ok(data)
    }

    fn validate(&self) -> Result<(), DataError> {
        let mut ids = HashSet::new();
        for thread in &self.threads {
            if thread.name.trim().is_empty() {
                return Err(DataError::InvalidRecord {
                    record: "chat thread",
                    reason: format!("thread {} has no name", thread.id),
                });
            }
            if !ids.insert(thread.id) {
                return Err(DataError::InvalidRecord {
                    record: "chat thread",
                    reason: format!("duplicate thread id {}", thread.id),
                });
            }
        }
        if let Some(message) = self.transcript.iter().find(|m| m.sender.trim().is_empty()) {
            return Err(DataError::InvalidRecord {
                record: "chat message",
                reason: format!("message {} has no sender", message.id),
            });
        }
        Ok(())
    }

    /// Total unread messages across all threads
    pub fn unread_total(&self) -> u32 {
        self.threads.iter().map(|t| t.unread).sum()
    }
}
