//! Agent runner commands
//!
//! Typed wrappers for the known agent families. Each wrapper builds the
//! task's parameter set and runs it with the agent polling defaults
//! (5s interval, 60 attempts) instead of the generic ones.

use std::collections::HashMap;

use anyhow::Result;
use clap::Subcommand;
use pulse_client::RunnerConfig;
use serde_json::json;

use crate::commands::run;
use crate::config::Config;

/// Agent subcommands
#[derive(Subcommand)]
pub enum AgentCommands {
    /// Scout anchor opportunities for a campaign
    Scout {
        /// Project the campaign belongs to
        #[arg(long)]
        project: String,

        /// Campaign to scout anchors for
        #[arg(long)]
        campaign: String,
    },
    /// Draft a strategy for a campaign
    Strategist {
        /// Project the campaign belongs to
        #[arg(long)]
        project: String,

        /// Campaign to draft a strategy for
        #[arg(long)]
        campaign: String,
    },
    /// Generate lead-gen actions for a project
    Leadgen {
        /// Project to generate actions for
        #[arg(long)]
        project: String,
    },
}

/// Handle agent commands
pub async fn handle_agent_command(command: AgentCommands, config: &Config) -> Result<()> {
    let (task, params) = match command {
        AgentCommands::Scout { project, campaign } => (
            "scout_anchors",
            HashMap::from([
                ("project_id".to_string(), json!(project)),
                ("campaign_id".to_string(), json!(campaign)),
            ]),
        ),
        AgentCommands::Strategist { project, campaign } => (
            "strategist_plan",
            HashMap::from([
                ("project_id".to_string(), json!(project)),
                ("campaign_id".to_string(), json!(campaign)),
            ]),
        ),
        AgentCommands::Leadgen { project } => (
            "leadgen_actions",
            HashMap::from([("project_id".to_string(), json!(project))]),
        ),
    };

    run::execute(config, task, params, RunnerConfig::agent()).await
}
