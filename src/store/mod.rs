//! In-memory conversation store.
//!
//! Idempotent key-value CRUD keyed by conversation id, with a
//! time-ordered listing. `id` and `created_at` are immutable after
//! creation; `updated_at` advances on every save.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ChatMessage;

/// A stored conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing entry: conversation metadata without the message bodies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Conversation> for ConversationSummary {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.clone(),
            title: conversation.title.clone(),
            user_id: conversation.user_id.clone(),
            created_at: conversation.created_at,
            updated_at: conversation.updated_at,
        }
    }
}

/// Generate a fresh conversation id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Thread-safe in-memory store. Construct one per process and share.
#[derive(Debug, Default)]
pub struct ConversationStore {
    conversations: RwLock<HashMap<String, Conversation>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or update a conversation.
    ///
    /// First save assigns `created_at`; later saves preserve it and bump
    /// `updated_at`. Returns the stored record.
    pub fn save(
        &self,
        id: &str,
        title: &str,
        messages: Vec<ChatMessage>,
        user_id: Option<&str>,
    ) -> Conversation {
        let mut conversations = self.conversations.write().unwrap();
        let now = Utc::now();
        let conversation = match conversations.get(id) {
            Some(existing) => Conversation {
                id: id.to_string(),
                title: title.to_string(),
                messages,
                user_id: user_id.map(str::to_string).or_else(|| existing.user_id.clone()),
                created_at: existing.created_at,
                updated_at: now,
            },
            None => Conversation {
                id: id.to_string(),
                title: title.to_string(),
                messages,
                user_id: user_id.map(str::to_string),
                created_at: now,
                updated_at: now,
            },
        };
        conversations.insert(id.to_string(), conversation.clone());
        conversation
    }

    pub fn get(&self, id: &str) -> Option<Conversation> {
        self.conversations.read().unwrap().get(id).cloned()
    }

    /// List conversation summaries, most recently updated first,
    /// optionally filtered by owner.
    pub fn list(&self, user_id: Option<&str>) -> Vec<ConversationSummary> {
        let conversations = self.conversations.read().unwrap();
        let mut summaries: Vec<ConversationSummary> = conversations
            .values()
            .filter(|c| match user_id {
                Some(user_id) => c.user_id.as_deref() == Some(user_id),
                None => true,
            })
            .map(ConversationSummary::from)
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        summaries
    }

    /// Remove a conversation. Returns whether a record existed.
    pub fn delete(&self, id: &str) -> bool {
        self.conversations.write().unwrap().remove(id).is_some()
    }
}
