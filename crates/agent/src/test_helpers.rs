//! Shared mock provider and tools for agent tests.

use async_trait::async_trait;
use motormind_core::error::{ProviderError, ToolError};
use motormind_core::message::Message;
use motormind_core::provider::{GenerationOptions, Provider};
use motormind_core::tool::{Tool, ToolRegistry};
use std::sync::Mutex;

/// A mock provider that replays a fixed script of generation outcomes,
/// recording the transcript it was handed at each call.
pub struct SequentialMockProvider {
    replies: Mutex<Vec<Result<String, ProviderError>>>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl SequentialMockProvider {
    pub fn scripted(replies: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A provider that returns one text reply, then errors.
    pub fn single_text(text: &str) -> Self {
        Self::scripted(vec![Ok(text.to_string())])
    }

    /// How many generation calls have been made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The transcript passed to the i-th generation call.
    pub fn history_at(&self, index: usize) -> Vec<Message> {
        self.calls.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        _prompt: &str,
        history: &[Message],
        _options: &GenerationOptions,
    ) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(history.to_vec());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        replies.remove(0)
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        // A crude but deterministic embedding: character-class counts.
        let letters = text.chars().filter(|c| c.is_alphabetic()).count() as f32;
        let digits = text.chars().filter(|c| c.is_ascii_digit()).count() as f32;
        let spaces = text.chars().filter(|c| c.is_whitespace()).count() as f32;
        Ok(vec![letters, digits, spaces, 1.0])
    }
}

/// A tool that echoes its input back, for observing dispatch behavior.
pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }
    fn usage(&self) -> &str {
        "Echoes back the input"
    }
    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        Ok(input.to_string())
    }
}

/// A registry holding just [`EchoTool`].
pub fn echo_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(EchoTool));
    registry
}
