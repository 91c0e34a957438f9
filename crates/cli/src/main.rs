//! Motormind CLI — the main entry point.
//!
//! Commands:
//! - `chat`  — Interactive conversation with history
//! - `ask`   — Single question, single answer
//! - `rag`   — Retrieval-grounded answer over an indexed document file
//! - `image` — Analyze a car photo and register its context

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "motormind",
    about = "Motormind — car marketplace assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat interactively, keeping conversation history
    Chat {
        /// Session identifier (a fresh one is generated if omitted)
        #[arg(short, long)]
        session: Option<String>,

        /// User identifier
        #[arg(short, long, default_value = "local")]
        user: String,
    },

    /// Ask a single question
    Ask {
        /// The question to ask
        message: String,
    },

    /// Answer a question grounded in an indexed document file
    Rag {
        /// The question to ask
        message: String,

        /// Plain-text file to index, one snippet per line
        #[arg(short, long)]
        docs: Option<String>,
    },

    /// Analyze a car image and print its context token
    Image {
        /// Path to a .jpg, .jpeg, or .png file
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat { session, user } => commands::chat::run(session, user).await?,
        Commands::Ask { message } => commands::ask::run(&message).await?,
        Commands::Rag { message, docs } => commands::rag::run(&message, docs).await?,
        Commands::Image { path } => commands::image::run(&path).await?,
    }

    Ok(())
}
