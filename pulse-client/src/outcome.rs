//! Caller-visible outcome of a task invocation

use pulse_core::domain::task::TaskOutput;
use thiserror::Error;

/// State of one task invocation, as observed by the caller.
///
/// Each invocation starts at `Idle`, moves to `Processing` before the
/// submission request is issued, and settles as `Success` or `Failed`.
/// Settled states are terminal for that invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskState {
    Idle,
    Processing,
    Success(TaskOutput),
    Failed(TaskFailure),
}

impl TaskState {
    /// True once the invocation has settled.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Success(_) | TaskState::Failed(_))
    }
}

/// Why an invocation failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaskFailure {
    /// Backend declined the submission outright; never polled.
    #[error("{0}")]
    Rejected(String),

    /// Network or HTTP failure talking to the backend.
    #[error("transport error: {0}")]
    Transport(String),

    /// The polled context no longer exists.
    #[error("context expired or not found")]
    ContextExpired,

    /// The job ran and reported failure.
    #[error("{0}")]
    Task(String),

    /// Attempt budget exhausted while the job was still processing.
    /// The job may still be running server-side.
    #[error("timed out after {attempts} poll attempts; the task may still be running")]
    Timeout { attempts: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!TaskState::Idle.is_terminal());
        assert!(!TaskState::Processing.is_terminal());
        assert!(TaskState::Failed(TaskFailure::ContextExpired).is_terminal());
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            TaskFailure::ContextExpired.to_string(),
            "context expired or not found"
        );
        assert_eq!(
            TaskFailure::Timeout { attempts: 60 }.to_string(),
            "timed out after 60 poll attempts; the task may still be running"
        );
        assert_eq!(
            TaskFailure::Task("quota exceeded".to_string()).to_string(),
            "quota exceeded"
        );
    }
}
