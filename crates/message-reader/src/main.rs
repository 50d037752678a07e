//! Terminal front-end for the mock conversation directory.
//!
//! Lists conversations, opens a thread grouped by day, and sends messages.
//! Data is generated at startup and lives only for the duration of the run.

mod commands;
mod display;
mod error;

use std::io;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use mock_directory::{build_directory, ReaderConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::commands::Format;

#[derive(Debug, Parser)]
#[command(name = "message-reader")]
#[command(about = "Browse and reply to conversations from the mock message directory")]
struct Args {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Seed for generated conversations (overrides READER_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Simulate network latency (overrides READER_SIMULATE_LATENCY)
    #[arg(long, global = true)]
    latency: bool,

    /// Message database path to record (overrides READER_DATABASE_PATH)
    #[arg(long, global = true)]
    database_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List conversations
    List {
        /// Only show conversations whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Open a conversation and print its messages
    Show {
        /// Exact user name
        name: String,
    },
    /// Send a message to a conversation
    Send {
        /// Exact user name
        name: String,
        /// Message text
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = ReaderConfig::from_env()?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.latency {
        config.simulate_latency = true;
    }
    if args.database_path.is_some() {
        config.database_path = args.database_path.clone();
    }

    let directory = build_directory(&config)?;
    info!(directory = directory.name(), "Directory ready");

    let format = if args.json { Format::Json } else { Format::Text };
    let mut out = io::stdout().lock();
    let now = Utc::now();

    match &args.command {
        Command::List { search } => {
            commands::list(directory.as_ref(), search.as_deref(), now, format, &mut out).await?
        }
        Command::Show { name } => {
            commands::show(directory.as_ref(), name, now, format, &mut out).await?
        }
        Command::Send { name, text } => {
            commands::send(directory.as_ref(), name, text, format, &mut out).await?
        }
    }

    Ok(())
}
