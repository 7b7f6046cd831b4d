//! Pulse CLI
//!
//! Command-line console for driving Pulse agent tasks: submit a task, watch
//! it through the polling protocol, and inspect task contexts.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Pulse agent task console", long_about = None)]
struct Cli {
    /// Pulse API base URL
    #[arg(long, env = "PULSE_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// User id recorded on submitted tasks
    #[arg(long, env = "PULSE_USER_ID", default_value = "console")]
    user: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulse_cli=warn,pulse_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        user_id: cli.user,
    };

    handle_command(cli.command, &config).await
}
