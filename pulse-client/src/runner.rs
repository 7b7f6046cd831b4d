//! Task runner
//!
//! Drives one agent-task invocation through the fire-and-poll protocol:
//! submit, classify the immediate response, and if the job is asynchronous,
//! poll its context on a fixed interval until it settles, fails, or the
//! attempt budget runs out.
//!
//! The runner owns a single observable state slot. Each call to
//! [`TaskRunner::run`] becomes the slot's current writer; [`TaskRunner::reset`]
//! or a newer `run` supersedes any invocation still in flight, after which
//! the superseded invocation can no longer publish into the slot. Supersession
//! is an equality check on a monotonically increasing invocation generation,
//! not a lock: polls are strictly sequential within an invocation, and the
//! hazard is a stale write landing after a reset, not a data race.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::TaskApi;
use crate::error::{ClientError, Result};
use crate::machine::{PollDecision, SubmitDecision, classify_poll, classify_submit};
use crate::outcome::{TaskFailure, TaskState};
use pulse_core::dto::task::TaskRequest;

/// Polling configuration for one task family
///
/// The attempt budget bounds the invocation by count, not wall clock, so a
/// single slow request cannot stretch the budget.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Delay between consecutive context polls
    pub poll_interval: Duration,
    /// Maximum number of polls before the invocation times out
    pub max_attempts: u32,
}

impl RunnerConfig {
    /// Generic defaults used by ad-hoc task runs (2s interval, 120 attempts)
    pub fn new() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            max_attempts: 120,
        }
    }

    /// Defaults used by the agent runners — scout, strategist, lead-gen —
    /// (5s interval, 60 attempts)
    pub fn agent() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            max_attempts: 60,
        }
    }

    /// Overrides the poll interval
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Overrides the attempt budget
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(ClientError::InvalidRequest(
                "poll_interval must be greater than 0".to_string(),
            ));
        }

        if self.max_attempts == 0 {
            return Err(ClientError::InvalidRequest(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives task invocations and publishes their state transitions
///
/// State advances `Idle → Processing → {Success | Failed}` for every
/// undisturbed invocation and is observable through [`TaskRunner::subscribe`].
pub struct TaskRunner {
    api: Arc<dyn TaskApi>,
    config: RunnerConfig,
    state: watch::Sender<TaskState>,
    generation: AtomicU64,
}

impl TaskRunner {
    /// Creates a new task runner
    ///
    /// # Arguments
    /// * `api` - Backend the runner submits to and polls
    /// * `config` - Polling interval and attempt budget
    pub fn new(api: Arc<dyn TaskApi>, config: RunnerConfig) -> Self {
        let (state, _) = watch::channel(TaskState::Idle);
        Self {
            api,
            config,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Subscribe to state transitions of the current slot
    pub fn subscribe(&self) -> watch::Receiver<TaskState> {
        self.state.subscribe()
    }

    /// Current state of the slot
    pub fn state(&self) -> TaskState {
        self.state.borrow().clone()
    }

    /// Returns the slot to `Idle` and invalidates any in-flight invocation
    ///
    /// A pending poll belonging to the invalidated invocation is suppressed:
    /// its eventual response can no longer alter the slot.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(TaskState::Idle);
        debug!("task slot reset");
    }

    /// Submit `task` and drive it to a terminal state
    ///
    /// Issues exactly one submission request and, when the job is
    /// asynchronous, at most `max_attempts` sequential polls. All failures —
    /// rejection, transport, domain, expiry, timeout — are reported through
    /// [`TaskState::Failed`] with a human-readable reason; nothing is
    /// silently retried.
    ///
    /// Returns the terminal state of this invocation, or [`TaskState::Idle`]
    /// when the invocation was superseded by [`TaskRunner::reset`] or a newer
    /// `run` while still in flight (in which case nothing more is published).
    pub async fn run(
        &self,
        task: &str,
        user_id: &str,
        params: HashMap<String, serde_json::Value>,
    ) -> TaskState {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Callers see "in flight" even while the submission request is on the
        // wire.
        self.publish(generation, TaskState::Processing);

        let request = TaskRequest {
            task: task.to_string(),
            user_id: user_id.to_string(),
            params,
        };

        debug!(task, "submitting task");
        let response = match self.api.submit_task(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(task, error = %e, "task submission failed");
                return self.settle(
                    generation,
                    TaskState::Failed(TaskFailure::Transport(e.to_string())),
                );
            }
        };

        let context_id = match classify_submit(&response) {
            SubmitDecision::Settle(state) => return self.settle(generation, state),
            SubmitDecision::Poll(context_id) => context_id,
        };

        info!(task, context_id = %context_id, "task accepted, polling for completion");
        self.poll(generation, &context_id).await
    }

    /// Polls `context_id` until it settles or the attempt budget runs out
    async fn poll(&self, generation: u64, context_id: &str) -> TaskState {
        for attempt in 1..=self.config.max_attempts {
            tokio::time::sleep(self.config.poll_interval).await;

            if self.superseded(generation) {
                debug!(context_id, "invocation superseded, dropping scheduled poll");
                return TaskState::Idle;
            }

            let context = match self.api.get_context(context_id).await {
                Ok(context) => context,
                Err(e) if e.is_not_found() => {
                    return self.settle(
                        generation,
                        TaskState::Failed(TaskFailure::ContextExpired),
                    );
                }
                Err(e) => {
                    warn!(context_id, error = %e, "context poll failed");
                    return self.settle(
                        generation,
                        TaskState::Failed(TaskFailure::Transport(e.to_string())),
                    );
                }
            };

            match classify_poll(&context) {
                PollDecision::Continue => {
                    debug!(context_id, attempt, "task still processing");
                }
                PollDecision::Settle(state) => return self.settle(generation, state),
            }
        }

        self.settle(
            generation,
            TaskState::Failed(TaskFailure::Timeout {
                attempts: self.config.max_attempts,
            }),
        )
    }

    /// True when a newer invocation or a reset owns the slot
    fn superseded(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    /// Publishes `state` unless this invocation has been superseded
    fn publish(&self, generation: u64, state: TaskState) -> bool {
        if self.superseded(generation) {
            return false;
        }
        self.state.send_replace(state);
        true
    }

    /// Publishes the terminal state, or reports supersession as `Idle`
    fn settle(&self, generation: u64, state: TaskState) -> TaskState {
        if !self.publish(generation, state.clone()) {
            debug!("invocation superseded, dropping terminal state");
            return TaskState::Idle;
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::new();
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.max_attempts, 120);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_agent_config() {
        let config = RunnerConfig::agent();
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.max_attempts, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = RunnerConfig::new().with_max_attempts(0);
        assert!(config.validate().is_err());

        let config = RunnerConfig::new().with_poll_interval(Duration::ZERO);
        assert!(config.validate().is_err());

        let config = RunnerConfig::new()
            .with_poll_interval(Duration::from_millis(500))
            .with_max_attempts(10);
        assert!(config.validate().is_ok());
    }
}
