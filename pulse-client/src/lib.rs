//! Pulse HTTP Client
//!
//! Client for the Pulse agent-task API: submit a long-running agent job,
//! receive a context handle when the job is asynchronous, and poll that
//! context until the job settles.
//!
//! The crate has two layers:
//! - [`TaskClient`]: thin, type-safe wrappers over the two API endpoints
//!   (`/api/run` and `/api/context/{id}`).
//! - [`TaskRunner`]: the state machine that drives a submission through the
//!   polling protocol to a terminal outcome, publishing every transition on
//!   an observable stream.
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use pulse_client::{RunnerConfig, TaskClient, TaskRunner, TaskState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TaskClient::new("http://localhost:8080");
//!     let runner = TaskRunner::new(Arc::new(client), RunnerConfig::agent());
//!
//!     let params = HashMap::from([
//!         ("project_id".to_string(), serde_json::json!("p1")),
//!     ]);
//!     match runner.run("scout_anchors", "u1", params).await {
//!         TaskState::Success(output) => println!("done: {}", output.data),
//!         TaskState::Failed(reason) => eprintln!("failed: {}", reason),
//!         _ => {}
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
mod contexts;
mod machine;
mod outcome;
mod runner;
mod tasks;

// Re-export commonly used types
pub use api::TaskApi;
pub use error::{ClientError, Result};
pub use machine::{PollDecision, SubmitDecision, classify_poll, classify_submit};
pub use outcome::{TaskFailure, TaskState};
pub use runner::{RunnerConfig, TaskRunner};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Pulse agent-task API
///
/// Wraps the two endpoints the async task protocol consists of:
/// - Task submission (`/api/run`)
/// - Context polling (`/api/context/{id}`)
#[derive(Debug, Clone)]
pub struct TaskClient {
    /// Base URL of the Pulse API (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl TaskClient {
    /// Create a new task client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Pulse API (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use pulse_client::TaskClient;
    ///
    /// let client = TaskClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new task client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Pulse API
    /// * `client` - A configured reqwest Client
    ///
    /// # Example
    /// ```
    /// use pulse_client::TaskClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = TaskClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the Pulse API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
