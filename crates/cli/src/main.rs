//! ResearchOwl CLI - owl command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod system_config;

/// ResearchOwl - writing workspace with debounced autosave
#[derive(Parser)]
#[command(name = "owl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the demonstration writing workspace
    Edit {
        /// Seed the document from a file (read-only; saves are simulated)
        file: Option<PathBuf>,

        /// Document title (defaults to the file stem)
        #[arg(long)]
        title: Option<String>,
    },
    /// View and edit autosave configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all configuration values
    List,
    /// Get a single configuration value
    Get {
        /// Dotted key, e.g. autosave.debounce_ms
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Dotted key, e.g. autosave.debounce_ms
        key: String,
        /// New value
        value: String,
    },
    /// Show the config file path
    Path {
        /// Create the file if it doesn't exist
        #[arg(long)]
        create: bool,
    },
    /// Show example configuration
    Example,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Edit { file, title } => cmd::edit::run(file, title).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::List => cmd::config::run_list().await,
            ConfigCommands::Get { key } => cmd::config::run_get(&key).await,
            ConfigCommands::Set { key, value } => cmd::config::run_set(&key, &value).await,
            ConfigCommands::Path { create } => cmd::config::run_path(create).await,
            ConfigCommands::Example => cmd::config::run_example().await,
        },
    }
}
