//! VibeWriter CLI - generate social media posts from a campaign topic.
//!
//! VibeWriter asks a text backend for several distinct captions, cleans them
//! up, pairs each with an image reference, and prints the result as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Three variants with the default (Gemini) backend
//! vibewriter generate --topic "Black Friday discount for coffee shop"
//!
//! # Offline, with placeholder image links, written to a file
//! vibewriter generate --topic "Summer smoothie launch" --llm-provider stub \
//!     --image-bank suggest --open-links --output posts.json
//!
//! # View configuration
//! vibewriter config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// VibeWriter - on-brand social captions and image suggestions in seconds.
#[derive(Parser, Debug)]
#[command(name = "vibewriter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate post variants for a topic
    Generate(cli::generate::GenerateArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    if let Err(e) = vibewriter_core::config::load_dotenv() {
        eprintln!("Warning: {e}");
    }
    let config = match vibewriter_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `vibewriter config path`."
            );
            vibewriter_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("VibeWriter v{}", vibewriter_core::VERSION);

    match cli.command {
        Commands::Generate(args) => cli::generate::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
