//! Context inspection command
//!
//! One-shot read of a context resource, for checking on a task whose
//! context id is already known.

use anyhow::Result;
use colored::*;
use pulse_client::TaskClient;
use pulse_core::domain::task::{ContextStatus, TaskContext};

use crate::config::Config;

/// Fetch and display a context by id
pub async fn show_context(config: &Config, id: &str) -> Result<()> {
    let client = TaskClient::new(&config.api_url);

    match client.get_context(id).await {
        Ok(context) => {
            print_context(&context);
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            println!("{}", "Context expired or not found.".yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Print detailed context information
fn print_context(context: &TaskContext) {
    println!("{}", "Context Details:".bold());
    println!("  ID:       {}", context.context_id.cyan());
    println!("  Project:  {}", context.project_id.dimmed());
    println!("  User:     {}", context.user_id.dimmed());
    println!(
        "  Created:  {}",
        context.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Expires:  {}",
        context.expires_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!("  Status:   {}", colorize_status(context.data.status));

    if let Some(result) = &context.data.result {
        println!("\n{}", "Result:".bold());
        println!("  Status:   {}", result.status);
        if !result.message.is_empty() {
            println!("  Message:  {}", result.message);
        }
        if !result.timestamp.is_empty() {
            println!("  Reported: {}", result.timestamp.dimmed());
        }
        if !result.data.is_null() {
            if let Ok(pretty) = serde_json::to_string_pretty(&result.data) {
                println!("\n{}", "Output:".bold());
                println!("{}", pretty);
            }
        }
    }
}

/// Colorize context status for display
fn colorize_status(status: ContextStatus) -> colored::ColoredString {
    match status {
        ContextStatus::Processing => "processing".cyan(),
        ContextStatus::Completed => "completed".green(),
        ContextStatus::Failed => "failed".red(),
    }
}
