pub mod ask;
pub mod chat;
pub mod image;
pub mod rag;

use motormind_agent::ReactAgent;
use motormind_config::AppConfig;
use motormind_core::provider::GenerationOptions;
use motormind_tools::{CarChatTool, ImageAnalysisTool, ImageContextRegistry, SqlQueryTool};
use std::sync::Arc;
use std::time::Duration;

/// Everything a command needs: the wired agent plus the image-context
/// registry it shares with the `image` command.
pub struct Wiring {
    pub agent: ReactAgent,
    pub images: Arc<ImageContextRegistry>,
}

/// Wire the agent from config: provider, tool registry, loop settings.
///
/// The SQL tool is skipped with a warning when the database file is
/// missing, so the assistant still answers general questions.
pub async fn build_agent(config: &AppConfig) -> Result<Wiring, Box<dyn std::error::Error>> {
    let provider = motormind_providers::create_provider(&config.generation)
        .map_err(|e| format!("Failed to configure provider: {e}"))?;

    let images = Arc::new(ImageContextRegistry::new());

    let mut registry = motormind_core::tool::ToolRegistry::new();
    if std::path::Path::new(&config.sql.database_path).exists() {
        let sql = SqlQueryTool::connect(&config.sql.database_path, provider.clone()).await?;
        registry.register(Box::new(sql));
    } else {
        tracing::warn!(
            path = %config.sql.database_path,
            "car database not found, SQL lookup disabled"
        );
    }
    registry.register(Box::new(CarChatTool::new(provider.clone())));
    registry.register(Box::new(ImageAnalysisTool::new(images.clone())));

    let options = GenerationOptions {
        max_tokens: Some(config.generation.max_tokens),
        temperature: config.generation.temperature,
    };

    let agent = ReactAgent::new(provider, Arc::new(registry))
        .with_max_iterations(config.agent.max_iterations)
        .with_generation_timeout(Duration::from_secs(config.agent.generation_timeout_secs))
        .with_options(options);

    Ok(Wiring { agent, images })
}

/// Fail early with setup guidance when the backend needs a key and none is set.
pub fn require_api_key(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.generation.backend != "ollama" && config.generation.api_key.is_none() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    MOTORMIND_API_KEY = 'sk-...'   (generic)");
        eprintln!("    OPENAI_API_KEY    = 'sk-...'   (for OpenAI)");
        eprintln!("    GROQ_API_KEY      = 'gsk_...'  (for Groq)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!(
            "    {}",
            AppConfig::config_dir().join("config.toml").display()
        );
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }
    Ok(())
}
