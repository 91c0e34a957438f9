//! In-memory conversation store — keyed append-only turn logs.
//!
//! Each `(session_id, user_id)` key maps to the accumulated transcript
//! text. The `RwLock` serializes concurrent writers, so two appends to the
//! same key cannot interleave within a turn. There is still no eviction
//! or size bound: entries grow for the lifetime of the process.

use async_trait::async_trait;
use motormind_core::error::StoreError;
use motormind_core::store::{ConversationKey, ConversationStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An in-memory conversation store backed by a HashMap.
pub struct InMemoryConversationStore {
    entries: Arc<RwLock<HashMap<ConversationKey, String>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of tracked conversations.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn get(&self, key: &ConversationKey) -> Result<String, StoreError> {
        Ok(self.entries.read().await.get(key).cloned().unwrap_or_default())
    }

    async fn append(
        &self,
        key: &ConversationKey,
        user_text: &str,
        assistant_text: &str,
    ) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(key.clone()).or_default();
        entry.push_str(&format!("\nUser: {user_text}\nAssistant: {assistant_text}"));
        Ok(())
    }
}
