//! `motormind chat` — interactive conversation with history.

use motormind_core::store::{ConversationKey, ConversationStore};
use motormind_store::InMemoryConversationStore;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(
    session: Option<String>,
    user: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = motormind_config::AppConfig::load()
        .map_err(|e| format!("Failed to load config: {e}"))?;
    super::require_api_key(&config)?;

    let session = session.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let key = ConversationKey::new(session.clone(), user);

    let wiring = super::build_agent(&config).await?;
    let store = InMemoryConversationStore::new();

    println!();
    println!("  Motormind — car marketplace assistant");
    println!();
    println!("  Backend:  {}", config.generation.backend);
    println!("  Model:    {}", config.generation.model);
    println!("  Session:  {session}");
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type '/image <path>' to attach a car photo.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    // A missing vision backend only disables /image, not the chat.
    let vision = match motormind_providers::create_provider(&config.vision) {
        Ok(p) => Some(p),
        Err(e) => {
            tracing::warn!("vision backend unavailable, /image disabled: {e}");
            None
        }
    };

    // Details of the most recently attached photo, seeded into each turn.
    let mut car_details = String::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("  You > ");
    use std::io::Write;
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            print!("  You > ");
            std::io::stdout().flush()?;
            continue;
        }
        if message == "exit" {
            break;
        }

        if let Some(path) = message.strip_prefix("/image ") {
            match &vision {
                Some(provider) => {
                    match super::image::analyze(path.trim(), provider.as_ref()).await {
                        Ok(details) => {
                            let token = wiring.images.register(&details);
                            car_details = details.clone();
                            println!();
                            println!("  {details}");
                            println!("  (context token: {token})");
                            println!();
                        }
                        Err(e) => eprintln!("  [Error] {e}"),
                    }
                }
                None => eprintln!("  [Error] No vision backend configured."),
            }
            print!("  You > ");
            std::io::stdout().flush()?;
            continue;
        }

        let history = store.get(&key).await?;

        eprint!("  ...");
        let answer = wiring.agent.run(message, &history, &car_details).await;
        eprint!("\r     \r");

        println!();
        for line in answer.lines() {
            println!("  Assistant > {line}");
        }
        println!();

        store.append(&key, message, &answer).await?;

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!("  Goodbye!");
    Ok(())
}
