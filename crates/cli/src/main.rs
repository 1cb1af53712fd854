//! AutoPulse CLI - Operator tools for the feedback collections.
//!
//! Works directly on the data directory; the server does not need to run.
//!
//! # Usage
//!
//! ```bash
//! # Aggregate statistics
//! ap-cli stats
//!
//! # Open issues, optionally by priority
//! ap-cli issues --priority critical
//!
//! # Check the collections against each other, append missing issues
//! ap-cli verify --repair
//! ```
//!
//! # Commands
//!
//! - `stats` - Print the statistics view as JSON
//! - `issues` - Print stored issues as JSON
//! - `verify` - Integrity check (missing issues, orphans, duplicate keys)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use autopulse_core::Priority;
use clap::{Parser, Subcommand};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "ap-cli")]
#[command(author, version, about = "AutoPulse operator tools")]
struct Cli {
    /// Directory holding feedback.json and issues.json
    #[arg(long, global = true, env = "AUTOPULSE_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print aggregate statistics
    Stats,
    /// Print stored issues
    Issues {
        /// Only issues of this priority (critical, high)
        #[arg(short, long)]
        priority: Option<Priority>,
    },
    /// Check feedback and issues for consistency
    Verify {
        /// Append issues that stored feedback should have produced
        #[arg(long)]
        repair: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::print_stdout)]
async fn run(cli: Cli) -> Result<ExitCode, CommandError> {
    let store = autopulse_server::db::DataStore::new(cli.data_dir);

    match cli.command {
        Commands::Stats => {
            let stats = commands::stats::compute(&store).await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Issues { priority } => {
            let issues = commands::issues::list(&store, priority).await?;
            println!("{}", serde_json::to_string_pretty(&issues)?);
        }
        Commands::Verify { repair } => {
            let outcome = commands::verify::run(&store, repair).await?;
            for line in outcome.summary() {
                println!("{line}");
            }
            if !outcome.remaining.is_clean() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
