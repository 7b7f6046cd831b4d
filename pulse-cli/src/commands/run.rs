//! Generic task run command
//!
//! Submits a task, streams state transitions while the runner drives the
//! polling protocol, and prints the terminal outcome.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use colored::*;
use pulse_client::{RunnerConfig, TaskClient, TaskRunner, TaskState};
use tracing::debug;
use uuid::Uuid;

use crate::config::Config;

/// Run an arbitrary task with the generic polling defaults
pub async fn run_task(
    config: &Config,
    task: &str,
    params: &[String],
    interval: u64,
    max_attempts: u32,
) -> Result<()> {
    let params = parse_params(params)?;
    let runner_config = RunnerConfig::new()
        .with_poll_interval(Duration::from_secs(interval))
        .with_max_attempts(max_attempts);

    execute(config, task, params, runner_config).await
}

/// Submit a task and drive it to a terminal state, printing progress
pub async fn execute(
    config: &Config,
    task: &str,
    params: HashMap<String, serde_json::Value>,
    runner_config: RunnerConfig,
) -> Result<()> {
    runner_config.validate()?;

    let run_id = Uuid::new_v4();
    debug!(%run_id, task, "starting task run");

    let client = TaskClient::new(&config.api_url);
    let runner = TaskRunner::new(Arc::new(client), runner_config);

    let mut updates = runner.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            if let TaskState::Processing = state {
                println!("{}", "⟳ task submitted, waiting for completion...".cyan());
            }
            if state.is_terminal() {
                break;
            }
        }
    });

    let outcome = runner.run(task, &config.user_id, params).await;
    let _ = printer.await;

    match outcome {
        TaskState::Success(output) => {
            println!("{}", "✓ task completed".green().bold());
            if !output.message.is_empty() {
                println!("  {}", output.message);
            }
            if !output.data.is_null() {
                let pretty = serde_json::to_string_pretty(&output.data)
                    .context("Failed to render task output")?;
                println!("{}", pretty);
            }
            Ok(())
        }
        TaskState::Failed(reason) => {
            bail!("task failed: {}", reason)
        }
        other => bail!("task ended in unexpected state: {:?}", other),
    }
}

/// Parse KEY=VALUE pairs into task parameters
///
/// Values that parse as JSON are passed through as-is; anything else is
/// taken as a plain string.
fn parse_params(pairs: &[String]) -> Result<HashMap<String, serde_json::Value>> {
    let mut params = HashMap::new();

    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("invalid parameter '{}', expected KEY=VALUE", pair))?;

        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        params.insert(key.to_string(), value);
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params_json_and_string_values() {
        let params = parse_params(&[
            "project_id=p1".to_string(),
            "limit=25".to_string(),
            "dry_run=true".to_string(),
        ])
        .unwrap();

        assert_eq!(params["project_id"], serde_json::json!("p1"));
        assert_eq!(params["limit"], serde_json::json!(25));
        assert_eq!(params["dry_run"], serde_json::json!(true));
    }

    #[test]
    fn test_parse_params_rejects_missing_separator() {
        assert!(parse_params(&["no-separator".to_string()]).is_err());
    }

    #[test]
    fn test_parse_params_keeps_value_with_equals_sign() {
        let params = parse_params(&["query=a=b".to_string()]).unwrap();
        assert_eq!(params["query"], serde_json::json!("a=b"));
    }
}
