//! LLM provider implementations for Motormind.
//!
//! All providers implement the `motormind_core::Provider` trait.
//! The factory selects and configures the correct provider from a
//! backend config section.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

use motormind_config::BackendConfig;
use motormind_core::error::Error;
use motormind_core::provider::Provider;
use std::sync::Arc;

/// Build a provider from one backend config section.
///
/// Recognized backends: `openai`, `groq`, `ollama`. Any of them can be
/// pointed at a custom endpoint via `base_url`.
pub fn create_provider(config: &BackendConfig) -> Result<Arc<dyn Provider>, Error> {
    let api_key = config.api_key.clone().unwrap_or_default();

    let provider = match config.backend.as_str() {
        "openai" => {
            if api_key.is_empty() {
                return Err(Error::Config {
                    message: "openai backend requires an API key".into(),
                });
            }
            match &config.base_url {
                Some(url) => OpenAiCompatProvider::new("openai", url, api_key),
                None => OpenAiCompatProvider::openai(api_key),
            }
        }
        "groq" => {
            if api_key.is_empty() {
                return Err(Error::Config {
                    message: "groq backend requires an API key".into(),
                });
            }
            OpenAiCompatProvider::groq(api_key)
        }
        "ollama" => OpenAiCompatProvider::ollama(config.base_url.as_deref()),
        other => {
            return Err(Error::Config {
                message: format!("Unknown backend: {other}"),
            });
        }
    };

    Ok(Arc::new(provider.with_defaults(config)))
}
