//! ASKBOT CLI — the main entry point.
//!
//! Commands:
//! - `chat`   — Interactive question loop on the terminal
//! - `serve`  — Start the HTTP gateway for the web front end
//! - `scrape` — Force a refresh of the FAQ cache
//! - `status` — Show configuration and cache state

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "askbot",
    about = "ASKBOT — assistente de dúvidas do Jovem Programador",
    version
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
    /// Chat with the assistant on the terminal
    Chat,

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Scrape the FAQ page and refresh the cache
    Scrape,

    /// Show configuration and cache status
    Status,
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
        Commands::Chat => commands::chat::run().await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Scrape => commands::scrape::run().await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
