//! Provider trait — the abstraction over LLM backends.
//!
//! A Provider knows how to turn a prompt plus a message history into text.
//! Vision and embedding support are optional: backends that lack them
//! return [`ProviderError::NotConfigured`] from the default methods.
//!
//! Implementations: OpenAI-compatible (covers OpenAI, Groq, Ollama, vLLM),
//! plus scripted mocks for tests.

use crate::error::ProviderError;
use crate::message::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Tunable knobs for a single generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Temperature (0.0 = deterministic)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    0.0
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: None,
            temperature: default_temperature(),
        }
    }
}

/// The core Provider trait.
///
/// The reasoning loop calls `generate()` without knowing which backend is
/// in use — pure polymorphism. Each call is a blocking external request
/// from the loop's perspective; calls within one loop invocation are
/// strictly ordered.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai", "groq").
    fn name(&self) -> &str;

    /// Generate text for `prompt`, with `history` as conversational context.
    ///
    /// An empty `prompt` means `history` already ends with the user turn
    /// and nothing extra should be appended. The reasoning loop uses this
    /// form because its transcript carries the user message; appending the
    /// prompt on top of such a history would send the user turn twice.
    /// Tools and one-shot flows pass the question as `prompt` with a short
    /// seed history instead.
    async fn generate(
        &self,
        prompt: &str,
        history: &[Message],
        options: &GenerationOptions,
    ) -> std::result::Result<String, ProviderError>;

    /// Describe an image, guided by `prompt`.
    ///
    /// Default implementation reports that vision isn't supported.
    async fn describe_image(
        &self,
        _image: &[u8],
        _prompt: &str,
    ) -> std::result::Result<String, ProviderError> {
        Err(ProviderError::NotConfigured(format!(
            "Provider '{}' does not support vision",
            self.name()
        )))
    }

    /// Generate an embedding vector for the given text.
    ///
    /// Default implementation reports that embeddings aren't supported.
    async fn embed(&self, _text: &str) -> std::result::Result<Vec<f32>, ProviderError> {
        Err(ProviderError::NotConfigured(format!(
            "Provider '{}' does not support embeddings",
            self.name()
        )))
    }
}
