//! Task lifecycle domain types
//!
//! Structures shared between the client (drives the protocol) and the CLI
//! (displays results). The backend owns all of these on the wire; the client
//! only interprets them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status carried by task envelopes: submission responses and embedded results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Complete,
    Processing,
    Error,
    Skipped,
    Warning,
}

impl ApiStatus {
    /// True for statuses that mean the work finished successfully.
    pub fn is_ok(self) -> bool {
        matches!(self, ApiStatus::Success | ApiStatus::Complete)
    }

    /// True for statuses that reject or fail the work outright.
    pub fn is_error(self) -> bool {
        matches!(
            self,
            ApiStatus::Error | ApiStatus::Skipped | ApiStatus::Warning
        )
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            ApiStatus::Success => "success",
            ApiStatus::Complete => "complete",
            ApiStatus::Processing => "processing",
            ApiStatus::Error => "error",
            ApiStatus::Skipped => "skipped",
            ApiStatus::Warning => "warning",
        };
        f.write_str(token)
    }
}

/// Authoritative lifecycle state of a polled context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextStatus {
    Processing,
    Completed,
    Failed,
}

impl ContextStatus {
    /// Once a context leaves `processing` it never transitions again.
    pub fn is_terminal(self) -> bool {
        !matches!(self, ContextStatus::Processing)
    }
}

impl fmt::Display for ContextStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            ContextStatus::Processing => "processing",
            ContextStatus::Completed => "completed",
            ContextStatus::Failed => "failed",
        };
        f.write_str(token)
    }
}

/// Result payload produced by an agent task.
///
/// A `completed` context can still carry an error-status output here; the
/// envelope status and this status are checked independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutput {
    pub status: ApiStatus,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub message: String,
    /// Backend-formatted timestamp, opaque to the client.
    #[serde(default)]
    pub timestamp: String,
}

/// Server-side handle for an in-flight or settled asynchronous task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskContext {
    pub context_id: String,
    pub project_id: String,
    pub user_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub data: ContextData,
}

/// Lifecycle section of a context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextData {
    pub status: ContextStatus,
    pub result: Option<TaskOutput>,
}
