//! In-memory vector index — cosine similarity over indexed snippets.
//!
//! The reference backend for the retrieval capability. Real deployments
//! would point the `VectorIndex` trait at an external vector database;
//! this keeps the ranking semantics testable without one.

use async_trait::async_trait;
use motormind_core::error::StoreError;
use motormind_core::store::{ScoredText, VectorIndex};
use std::sync::Arc;
use tokio::sync::RwLock;

/// One indexed snippet with its embedding.
#[derive(Debug, Clone)]
struct IndexedText {
    text: String,
    embedding: Vec<f32>,
}

/// An in-memory cosine-similarity index.
pub struct InMemoryVectorIndex {
    entries: Arc<RwLock<Vec<IndexedText>>>,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Add a snippet with its embedding to the index.
    pub async fn insert(&self, text: impl Into<String>, embedding: Vec<f32>) {
        self.entries.write().await.push(IndexedText {
            text: text.into(),
            embedding,
        });
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryVectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ScoredText>, StoreError> {
        let entries = self.entries.read().await;

        let mut scored: Vec<ScoredText> = entries
            .iter()
            .map(|e| ScoredText {
                text: e.text.clone(),
                score: cosine_similarity(&e.embedding, vector),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);

        Ok(scored)
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 = identical, 0 = orthogonal.
/// Returns 0.0 if the vectors differ in length or are empty.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }

    (dot / denom) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_identical_vectors() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_orthogonal_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn cosine_mismatched_lengths() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[tokio::test]
    async fn search_ranks_by_similarity() {
        let index = InMemoryVectorIndex::new();
        index.insert("red sedan", vec![1.0, 0.0, 0.0]).await;
        index.insert("blue SUV", vec![0.0, 1.0, 0.0]).await;
        index.insert("red coupe", vec![0.9, 0.1, 0.0]).await;

        let results = index.search(&[1.0, 0.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "red sedan");
        assert_eq!(results[1].text, "red coupe");
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn search_respects_limit() {
        let index = InMemoryVectorIndex::new();
        for i in 0..10 {
            index.insert(format!("car {i}"), vec![i as f32, 1.0]).await;
        }
        let results = index.search(&[1.0, 1.0], 3).await.unwrap();
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn search_empty_index() {
        let index = InMemoryVectorIndex::new();
        let results = index.search(&[1.0, 0.0], 3).await.unwrap();
        assert!(results.is_empty());
    }
}
