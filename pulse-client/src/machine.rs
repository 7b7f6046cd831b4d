//! Pure classification core of the task runner
//!
//! Maps backend envelopes to state decisions without performing any I/O, so
//! every branch of the protocol is testable without a server. The runner
//! drives these functions with HTTP responses and timer ticks.

use tracing::warn;

use crate::outcome::{TaskFailure, TaskState};
use pulse_core::domain::task::{ApiStatus, ContextStatus, TaskContext, TaskOutput};
use pulse_core::dto::task::TaskSubmitResponse;

/// Decision taken from the immediate submission response.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitDecision {
    /// The call finished synchronously; the invocation settles now.
    Settle(TaskState),
    /// The job is asynchronous; poll this context until it settles.
    Poll(String),
}

/// Decision taken from one polled context snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum PollDecision {
    /// Still processing; poll again after one interval.
    Continue,
    /// Terminal; stop polling.
    Settle(TaskState),
}

/// Classify the immediate response to a task submission.
///
/// `success` and `complete` settle as [`TaskState::Success`] — even for task
/// families that normally run asynchronously. `processing` enters the polling
/// phase only when the response names a context; a `processing` response
/// without one is a protocol violation and settles as failed.
pub fn classify_submit(response: &TaskSubmitResponse) -> SubmitDecision {
    match response.status {
        ApiStatus::Success | ApiStatus::Complete => {
            SubmitDecision::Settle(TaskState::Success(TaskOutput {
                status: response.status,
                data: response.data.clone().unwrap_or(serde_json::Value::Null),
                message: response.message.clone().unwrap_or_default(),
                timestamp: String::new(),
            }))
        }
        ApiStatus::Processing => match response.context_id() {
            Some(context_id) => SubmitDecision::Poll(context_id.to_string()),
            None => SubmitDecision::Settle(TaskState::Failed(TaskFailure::Rejected(
                "processing response did not include a context_id".to_string(),
            ))),
        },
        ApiStatus::Error | ApiStatus::Skipped | ApiStatus::Warning => {
            let reason = response
                .message
                .clone()
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| format!("task rejected with status {}", response.status));
            SubmitDecision::Settle(TaskState::Failed(TaskFailure::Rejected(reason)))
        }
    }
}

/// Classify one polled context snapshot.
///
/// A `completed` envelope is not enough on its own: the embedded result can
/// still carry an error-class status, in which case the invocation settles
/// as failed with the result's message. Both levels are always checked.
pub fn classify_poll(context: &TaskContext) -> PollDecision {
    match context.data.status {
        ContextStatus::Processing => PollDecision::Continue,
        ContextStatus::Completed => match &context.data.result {
            Some(result) if result.status.is_error() => {
                let reason = if result.message.is_empty() {
                    format!("task completed with {} result", result.status)
                } else {
                    result.message.clone()
                };
                PollDecision::Settle(TaskState::Failed(TaskFailure::Task(reason)))
            }
            Some(result) => {
                if result.status == ApiStatus::Processing {
                    warn!(
                        context_id = %context.context_id,
                        "completed context carries a processing result"
                    );
                }
                PollDecision::Settle(TaskState::Success(result.clone()))
            }
            // The backend omitted the result payload; the envelope still says
            // the job completed.
            None => PollDecision::Settle(TaskState::Success(TaskOutput {
                status: ApiStatus::Complete,
                data: serde_json::Value::Null,
                message: String::new(),
                timestamp: String::new(),
            })),
        },
        ContextStatus::Failed => {
            let reason = context
                .data
                .result
                .as_ref()
                .map(|result| result.message.clone())
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| "task failed".to_string());
            PollDecision::Settle(TaskState::Failed(TaskFailure::Task(reason)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submit_response(body: serde_json::Value) -> TaskSubmitResponse {
        serde_json::from_value(body).unwrap()
    }

    fn context(data: serde_json::Value) -> TaskContext {
        serde_json::from_value(json!({
            "context_id": "ctx-1",
            "project_id": "p1",
            "user_id": "u1",
            "created_at": "2026-08-06T10:00:00Z",
            "expires_at": "2026-08-06T11:00:00Z",
            "data": data
        }))
        .unwrap()
    }

    #[test]
    fn test_submit_success_settles_synchronously() {
        let decision = classify_submit(&submit_response(json!({
            "status": "success",
            "data": {"emails": 3},
            "message": "done"
        })));

        match decision {
            SubmitDecision::Settle(TaskState::Success(output)) => {
                assert_eq!(output.data["emails"], 3);
                assert_eq!(output.message, "done");
            }
            other => panic!("expected synchronous success, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_complete_settles_synchronously() {
        let decision = classify_submit(&submit_response(json!({"status": "complete"})));
        assert!(matches!(
            decision,
            SubmitDecision::Settle(TaskState::Success(_))
        ));
    }

    #[test]
    fn test_submit_processing_enters_polling() {
        let decision = classify_submit(&submit_response(json!({
            "status": "processing",
            "data": {"context_id": "ctx-9"}
        })));

        assert_eq!(decision, SubmitDecision::Poll("ctx-9".to_string()));
    }

    #[test]
    fn test_submit_processing_without_context_id_is_rejected() {
        let decision = classify_submit(&submit_response(json!({"status": "processing"})));

        match decision {
            SubmitDecision::Settle(TaskState::Failed(TaskFailure::Rejected(reason))) => {
                assert!(reason.contains("context_id"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_error_statuses_are_rejected_with_message() {
        for status in ["error", "skipped", "warning"] {
            let decision = classify_submit(&submit_response(json!({
                "status": status,
                "message": "no credits left"
            })));

            match decision {
                SubmitDecision::Settle(TaskState::Failed(TaskFailure::Rejected(reason))) => {
                    assert_eq!(reason, "no credits left");
                }
                other => panic!("expected rejection for {}, got {:?}", status, other),
            }
        }
    }

    #[test]
    fn test_submit_rejection_without_message_gets_generic_reason() {
        let decision = classify_submit(&submit_response(json!({"status": "skipped"})));

        match decision {
            SubmitDecision::Settle(TaskState::Failed(TaskFailure::Rejected(reason))) => {
                assert_eq!(reason, "task rejected with status skipped");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_poll_processing_continues() {
        let decision = classify_poll(&context(json!({"status": "processing", "result": null})));
        assert_eq!(decision, PollDecision::Continue);
    }

    #[test]
    fn test_poll_completed_with_ok_result_succeeds() {
        let decision = classify_poll(&context(json!({
            "status": "completed",
            "result": {
                "status": "success",
                "data": {"anchors": 12},
                "message": "ok",
                "timestamp": "2026-08-06T10:05:00Z"
            }
        })));

        match decision {
            PollDecision::Settle(TaskState::Success(output)) => {
                assert_eq!(output.data["anchors"], 12);
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_poll_completed_with_error_result_fails() {
        // The envelope/result asymmetry: completed at the envelope level,
        // error at the result level.
        let decision = classify_poll(&context(json!({
            "status": "completed",
            "result": {
                "status": "error",
                "data": null,
                "message": "no anchors matched the campaign",
                "timestamp": ""
            }
        })));

        match decision {
            PollDecision::Settle(TaskState::Failed(TaskFailure::Task(reason))) => {
                assert_eq!(reason, "no anchors matched the campaign");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_poll_completed_with_messageless_error_result_gets_generic_reason() {
        let decision = classify_poll(&context(json!({
            "status": "completed",
            "result": {"status": "warning"}
        })));

        match decision {
            PollDecision::Settle(TaskState::Failed(TaskFailure::Task(reason))) => {
                assert_eq!(reason, "task completed with warning result");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_poll_completed_without_result_succeeds_with_empty_output() {
        let decision = classify_poll(&context(json!({"status": "completed", "result": null})));

        match decision {
            PollDecision::Settle(TaskState::Success(output)) => {
                assert!(output.data.is_null());
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_poll_failed_uses_result_message() {
        let decision = classify_poll(&context(json!({
            "status": "failed",
            "result": {"status": "error", "message": "upstream provider down"}
        })));

        match decision {
            PollDecision::Settle(TaskState::Failed(TaskFailure::Task(reason))) => {
                assert_eq!(reason, "upstream provider down");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_poll_failed_without_message_gets_generic_reason() {
        let decision = classify_poll(&context(json!({"status": "failed", "result": null})));

        match decision {
            PollDecision::Settle(TaskState::Failed(TaskFailure::Task(reason))) => {
                assert_eq!(reason, "task failed");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
