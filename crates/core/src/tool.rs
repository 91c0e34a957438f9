//! Tool trait — the abstraction over loop-invocable capabilities.
//!
//! Tools are what the reasoning loop can call mid-reasoning: structured
//! SQL lookup, image-context resolution, generic car chat. The protocol
//! is plain text on both sides: a tool receives the action input as text
//! and produces text that is re-injected into the transcript as an
//! Observation.

use crate::error::ToolError;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::warn;

/// The core Tool trait.
///
/// Tools are registered in the [`ToolRegistry`] and dispatched by name.
/// `invoke` should be total over its input domain — failures it can
/// describe are better returned as `Ok(text)` so the model can read them;
/// anything that does escape as `Err` is converted to observation text at
/// the registry boundary and never propagates past it.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "handle_sql_mode").
    fn name(&self) -> &str;

    /// Usage guidance injected into the reasoning system prompt.
    fn usage(&self) -> &str;

    /// Execute the tool with the given text input.
    async fn invoke(&self, input: &str) -> std::result::Result<String, ToolError>;
}

/// A registry of available tools.
///
/// The reasoning loop uses this to:
/// 1. Enumerate tool names and usage guidance for the system prompt
/// 2. Dispatch parsed actions to the matching tool
///
/// The tool set is registry *contents*, not hard-coded branches — which
/// tools an agent carries is decided at wiring time.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
    /// Registration order, so prompt enumeration is stable.
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        if !self.tools.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// List registered tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Tool names with usage guidance, for system-prompt assembly.
    pub fn usage_catalog(&self) -> Vec<(&str, &str)> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name).map(|t| (t.name(), t.usage())))
            .collect()
    }

    /// Dispatch an action to the named tool and return the observation text.
    ///
    /// This never fails: an unknown name or a tool error becomes descriptive
    /// text that the model reads as the Observation.
    pub async fn dispatch(&self, name: &str, input: &str) -> String {
        let Some(tool) = self.tools.get(name) else {
            return format!("Unknown tool: {name}");
        };

        match tool.invoke(input).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = name, "tool invocation failed: {e}");
                format!("Error: {e}")
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
