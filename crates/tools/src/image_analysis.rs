//! Image analysis tool — token side-channel for non-text resources.
//!
//! The reasoning loop is pure text, so it cannot hold raw image bytes.
//! Instead, the upload path analyzes the image up front and registers the
//! extracted details under an opaque token; the tool resolves that token
//! back to the details when the model asks for them. Inputs that do not
//! resolve fall back to the placeholder reply, preserving the behavior of
//! a loop with no uploaded image.

use async_trait::async_trait;
use motormind_core::error::ToolError;
use motormind_core::tool::Tool;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

const USAGE: &str = "<image token or file reference> \
Use this tool when the user wants to analyze an uploaded car image. Pass the image token \
issued at upload time to retrieve the extracted details.";

/// Token → vision-extracted details, shared between the upload path and
/// the tool. Process-lifetime, no eviction.
pub struct ImageContextRegistry {
    details: RwLock<HashMap<String, String>>,
}

impl ImageContextRegistry {
    pub fn new() -> Self {
        Self {
            details: RwLock::new(HashMap::new()),
        }
    }

    /// Store extracted details and return a fresh opaque token for them.
    pub fn register(&self, details: impl Into<String>) -> String {
        let token = format!("img-{}", Uuid::new_v4());
        self.details
            .write()
            .expect("image registry lock poisoned")
            .insert(token.clone(), details.into());
        token
    }

    /// Resolve a token back to its details.
    pub fn resolve(&self, token: &str) -> Option<String> {
        self.details
            .read()
            .expect("image registry lock poisoned")
            .get(token)
            .cloned()
    }
}

impl Default for ImageContextRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The `process_uploaded_image` tool.
pub struct ImageAnalysisTool {
    registry: std::sync::Arc<ImageContextRegistry>,
}

impl ImageAnalysisTool {
    pub fn new(registry: std::sync::Arc<ImageContextRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Tool for ImageAnalysisTool {
    fn name(&self) -> &str {
        "process_uploaded_image"
    }

    fn usage(&self) -> &str {
        USAGE
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        if let Some(details) = self.registry.resolve(input.trim()) {
            return Ok(details);
        }
        Ok(format!("(Mocked) Called process_uploaded_image with: {input}"))
    }
}
