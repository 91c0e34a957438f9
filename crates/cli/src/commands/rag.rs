//! `motormind rag` — retrieval-grounded answering over a document file.
//!
//! Indexes the lines of a plain-text document file, then answers the
//! question grounded in the closest snippets. The generation and
//! embedding backends come from their own config sections; the number of
//! retrieved snippets follows `retrieval.search_limit`.

use motormind_agent::RagPipeline;
use motormind_core::provider::{GenerationOptions, Provider};
use motormind_store::InMemoryVectorIndex;
use std::sync::Arc;
use tracing::info;

pub async fn run(message: &str, docs: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = motormind_config::AppConfig::load()
        .map_err(|e| format!("Failed to load config: {e}"))?;
    super::require_api_key(&config)?;

    let generator = motormind_providers::create_provider(&config.generation)
        .map_err(|e| format!("Failed to configure provider: {e}"))?;
    let embedder = motormind_providers::create_provider(&config.embedding)
        .map_err(|e| format!("Failed to configure embedding provider: {e}"))?;

    let index = Arc::new(InMemoryVectorIndex::new());
    if let Some(path) = docs {
        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {path}: {e}"))?;
        let indexed = index_lines(embedder.as_ref(), &index, &text).await?;
        info!(snippets = indexed, path, "documents indexed");
    }

    let options = GenerationOptions {
        max_tokens: Some(config.generation.max_tokens),
        temperature: config.generation.temperature,
    };
    let pipeline = RagPipeline::new(generator, embedder, index)
        .with_search_limit(config.retrieval.search_limit)
        .with_options(options);

    eprint!("  Searching...");
    let reply = pipeline.answer(message).await?;
    eprint!("\r             \r");

    println!("{}", reply.answer);
    Ok(())
}

/// Embed and index every non-empty line; returns how many were indexed.
async fn index_lines(
    embedder: &dyn Provider,
    index: &InMemoryVectorIndex,
    text: &str,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut indexed = 0;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let embedding = embedder.embed(line).await?;
        index.insert(line, embedding).await;
        indexed += 1;
    }
    Ok(indexed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use motormind_core::error::ProviderError;
    use motormind_core::message::Message;

    struct CountingEmbedder;

    #[async_trait]
    impl Provider for CountingEmbedder {
        fn name(&self) -> &str {
            "counting"
        }
        async fn generate(
            &self,
            _prompt: &str,
            _history: &[Message],
            _options: &GenerationOptions,
        ) -> Result<String, ProviderError> {
            Err(ProviderError::EmptyResponse)
        }
        async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
            Ok(vec![text.len() as f32, 1.0])
        }
    }

    #[tokio::test]
    async fn indexes_non_empty_lines_only() {
        let index = InMemoryVectorIndex::new();
        let text = "2019 BMW 320i, 28000 USD\n\n   \n2021 Audi A4, 35000 USD\n";

        let indexed = index_lines(&CountingEmbedder, &index, text).await.unwrap();
        assert_eq!(indexed, 2);
        assert_eq!(index.len().await, 2);
    }

    #[tokio::test]
    async fn empty_document_indexes_nothing() {
        let index = InMemoryVectorIndex::new();
        let indexed = index_lines(&CountingEmbedder, &index, "\n\n").await.unwrap();
        assert_eq!(indexed, 0);
        assert!(index.is_empty().await);
    }
}
