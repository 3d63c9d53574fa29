//! Job Club CLI - API server and maintenance commands.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "jobclub")]
#[command(about = "Job Club onboarding API and content tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to jobclub.toml config file
    #[arg(short, long, default_value = "jobclub.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter jobclub.toml and .env.example
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Run the API server
    Serve {
        /// Host to bind to (defaults to config or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to config or 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Pre-built site to serve for non-API paths
        #[arg(short = 'd', long)]
        static_dir: Option<PathBuf>,
    },

    /// Post an event announcement to the chat webhook
    Announce {
        /// Content store id of the event
        event_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets usually come from a .env file during local development
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Serve {
            host,
            port,
            static_dir,
        } => {
            commands::serve::run(&cli.config, host, port, static_dir).await?;
        }
        Commands::Announce { event_id } => {
            commands::announce::run(&cli.config, &event_id).await?;
        }
    }

    Ok(())
}
