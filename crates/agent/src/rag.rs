//! Retrieval-augmented answering over indexed car descriptions.
//!
//! The pipeline embeds the query, pulls the nearest snippets from a
//! [`VectorIndex`], and asks the provider to synthesize a grounded answer.
//! It sits beside the ReAct loop rather than inside it: retrieval is a
//! whole-question flow, not a mid-reasoning tool.

use motormind_core::error::{Error, Result};
use motormind_core::message::Message;
use motormind_core::prompts::{rag_user_prompt, RAG_SYSTEM_PROMPT};
use motormind_core::provider::{GenerationOptions, Provider};
use motormind_core::store::{ScoredText, VectorIndex};
use std::sync::Arc;
use tracing::{debug, info};

/// A synthesized answer together with the snippets it was grounded in.
#[derive(Debug, Clone)]
pub struct RagReply {
    pub answer: String,
    pub sources: Vec<ScoredText>,
}

/// Embed → search → synthesize.
///
/// Generation and embedding are separate providers: deployments routinely
/// pair a chat backend with a dedicated embedding backend.
pub struct RagPipeline {
    generator: Arc<dyn Provider>,
    embedder: Arc<dyn Provider>,
    index: Arc<dyn VectorIndex>,
    options: GenerationOptions,
    search_limit: usize,
}

impl RagPipeline {
    pub fn new(
        generator: Arc<dyn Provider>,
        embedder: Arc<dyn Provider>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            generator,
            embedder,
            index,
            options: GenerationOptions::default(),
            search_limit: 3,
        }
    }

    /// Set how many snippets to retrieve per query.
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    /// Set the generation options.
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Answer `query` grounded in retrieved snippets.
    ///
    /// An empty index is not an error: the provider is still asked, with a
    /// message stating that no documents were found, and will apologize per
    /// its instructions.
    pub async fn answer(&self, query: &str) -> Result<RagReply> {
        let vector = self.embedder.embed(query).await?;
        if vector.is_empty() {
            return Err(Error::Internal(
                "embedding provider returned an empty vector".into(),
            ));
        }

        let sources = self.index.search(&vector, self.search_limit).await?;
        debug!(hits = sources.len(), "retrieval completed");

        let context = if sources.is_empty() {
            "No matching documents were found.".to_string()
        } else {
            sources
                .iter()
                .enumerate()
                .map(|(i, s)| format!("Document {}: {}", i + 1, s.text))
                .collect::<Vec<_>>()
                .join("\n")
        };

        let message = format!("Query: {query}\n\n{context}");
        let history = vec![Message::system(RAG_SYSTEM_PROMPT)];
        let answer = self
            .generator
            .generate(&rag_user_prompt(&message), &history, &self.options)
            .await?;

        info!(sources = sources.len(), "RAG answer synthesized");
        Ok(RagReply { answer, sources })
    }
}
