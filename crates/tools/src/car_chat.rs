//! Generic car-chat tool — forwards to the generation provider with the
//! car-assistant persona.

use async_trait::async_trait;
use motormind_core::error::ToolError;
use motormind_core::message::Message;
use motormind_core::prompts::CAR_CHAT_SYSTEM_PROMPT;
use motormind_core::provider::{GenerationOptions, Provider};
use motormind_core::tool::Tool;
use std::sync::Arc;
use tracing::warn;

const USAGE: &str = "<text question or conversation> \
Use this tool if the user is asking general questions not requiring SQL queries: general \
conversation about cars, scheduling or arranging a car, or discussion about general \
features of a car.";

/// The `handle_normal_chat_mode` tool.
pub struct CarChatTool {
    provider: Arc<dyn Provider>,
}

impl CarChatTool {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for CarChatTool {
    fn name(&self) -> &str {
        "handle_normal_chat_mode"
    }

    fn usage(&self) -> &str {
        USAGE
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let history = [Message::system(CAR_CHAT_SYSTEM_PROMPT)];

        match self
            .provider
            .generate(input, &history, &GenerationOptions::default())
            .await
        {
            Ok(reply) => Ok(reply.trim().to_string()),
            Err(e) => {
                warn!("car chat generation failed: {e}");
                Ok(format!("Error generating chat response: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motormind_core::error::ProviderError;

    struct CapturingProvider {
        reply: Option<String>,
    }

    #[async_trait]
    impl Provider for CapturingProvider {
        fn name(&self) -> &str {
            "capturing"
        }
        async fn generate(
            &self,
            prompt: &str,
            history: &[Message],
            _options: &GenerationOptions,
        ) -> Result<String, ProviderError> {
            assert_eq!(history.len(), 1);
            assert!(history[0].content.contains("buying and selling of cars"));
            match &self.reply {
                Some(r) => Ok(format!("{r} (to: {prompt})")),
                None => Err(ProviderError::EmptyResponse),
            }
        }
    }

    #[tokio::test]
    async fn forwards_input_with_persona_history() {
        let tool = CarChatTool::new(Arc::new(CapturingProvider {
            reply: Some("Sure".into()),
        }));
        let out = tool.invoke("can I test drive on Sunday?").await.unwrap();
        assert!(out.contains("can I test drive on Sunday?"));
    }

    #[tokio::test]
    async fn provider_failure_becomes_text() {
        let tool = CarChatTool::new(Arc::new(CapturingProvider { reply: None }));
        let out = tool.invoke("hello").await.unwrap();
        assert!(out.starts_with("Error generating chat response:"));
    }
}
