//! Storage traits — conversation history and vector retrieval.
//!
//! The conversation store carries continuity *between* loop invocations:
//! each completed turn is appended as plain `User:`/`Assistant:` lines,
//! and the accumulated text is injected into the next invocation's seed
//! transcript. The loop itself never touches the store.

use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Key identifying one conversation: `(session_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey {
    pub session_id: String,
    pub user_id: String,
}

impl ConversationKey {
    pub fn new(session_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// Keyed append-only log of conversation turns.
///
/// Entries live for the lifetime of the process — there is no eviction,
/// TTL, or size bound. An unbounded key space will grow without limit.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// A human-readable name for this backend.
    fn name(&self) -> &str;

    /// Accumulated transcript text for the key, or empty if absent.
    async fn get(&self, key: &ConversationKey) -> std::result::Result<String, StoreError>;

    /// Append one completed turn to the key's entry, creating it if absent.
    async fn append(
        &self,
        key: &ConversationKey,
        user_text: &str,
        assistant_text: &str,
    ) -> std::result::Result<(), StoreError>;
}

/// A retrieved text snippet with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredText {
    pub text: String,
    pub score: f32,
}

/// Vector-similarity search over indexed text snippets.
///
/// Indexing mechanics (collection management, resets, bulk inserts) belong
/// to the backing store; the assistant only consumes ranked search results.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// A human-readable name for this index.
    fn name(&self) -> &str;

    /// Return up to `limit` snippets ranked by similarity to `vector`.
    async fn search(
        &self,
        vector: &[f32],
        limit: usize,
    ) -> std::result::Result<Vec<ScoredText>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_key_equality() {
        let a = ConversationKey::new("s1", "u1");
        let b = ConversationKey::new("s1", "u1");
        let c = ConversationKey::new("s1", "u2");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn scored_text_serializes() {
        let s = ScoredText {
            text: "2015 BMW 320i, 45k miles".into(),
            score: 0.91,
        };
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("BMW"));
    }
}
