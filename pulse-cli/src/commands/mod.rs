//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod agent;
mod context;
mod run;

pub use agent::AgentCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a task and poll it to completion
    Run {
        /// Task identifier, e.g. "scout_anchors"
        task: String,

        /// Task parameters as KEY=VALUE pairs; values are parsed as JSON
        /// when possible, otherwise taken as strings
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Seconds between context polls
        #[arg(long, default_value_t = 2)]
        interval: u64,

        /// Maximum number of polls before giving up
        #[arg(long, default_value_t = 120)]
        max_attempts: u32,
    },
    /// Run a named agent with production polling defaults
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },
    /// Fetch a task context by id
    Context {
        /// Context id announced by a processing submission
        id: String,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Run {
            task,
            params,
            interval,
            max_attempts,
        } => run::run_task(config, &task, &params, interval, max_attempts).await,
        Commands::Agent { command } => agent::handle_agent_command(command, config).await,
        Commands::Context { id } => context::show_context(config, &id).await,
    }
}
