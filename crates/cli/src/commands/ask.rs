//! `motormind ask` — single question, single answer.

pub async fn run(message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = motormind_config::AppConfig::load()
        .map_err(|e| format!("Failed to load config: {e}"))?;
    super::require_api_key(&config)?;

    let wiring = super::build_agent(&config).await?;

    eprint!("  Thinking...");
    let answer = wiring.agent.run(message, "", "").await;
    eprint!("\r            \r");
    println!("{answer}");

    Ok(())
}
