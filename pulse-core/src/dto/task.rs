//! Task submission DTOs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::task::ApiStatus;

/// Request to run an agent task.
///
/// `task` names the job type and is interpreted by the backend; `params`
/// carries job-specific arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRequest {
    pub task: String,
    pub user_id: String,
    pub params: HashMap<String, serde_json::Value>,
}

/// Immediate response to a task submission.
///
/// A `processing` status means the job runs asynchronously and `data` must
/// name the context to poll; every other status settles the call right away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSubmitResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl TaskSubmitResponse {
    /// Context id announced by a `processing` response.
    ///
    /// Returns `None` when the field is absent, empty, or not a string. A
    /// `processing` response without a context id is a protocol violation
    /// and must be treated as an error by the caller.
    pub fn context_id(&self) -> Option<&str> {
        self.data
            .as_ref()?
            .get("context_id")?
            .as_str()
            .filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = TaskRequest {
            task: "scout_anchors".to_string(),
            user_id: "u1".to_string(),
            params: HashMap::from([("project_id".to_string(), json!("p1"))]),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["task"], "scout_anchors");
        assert_eq!(value["params"]["project_id"], "p1");
    }

    #[test]
    fn test_context_id_present() {
        let response: TaskSubmitResponse = serde_json::from_value(json!({
            "status": "processing",
            "data": {"context_id": "ctx-42"}
        }))
        .unwrap();

        assert_eq!(response.status, ApiStatus::Processing);
        assert_eq!(response.context_id(), Some("ctx-42"));
    }

    #[test]
    fn test_context_id_missing_or_invalid() {
        let no_data: TaskSubmitResponse =
            serde_json::from_value(json!({"status": "processing"})).unwrap();
        assert_eq!(no_data.context_id(), None);

        let empty: TaskSubmitResponse = serde_json::from_value(json!({
            "status": "processing",
            "data": {"context_id": ""}
        }))
        .unwrap();
        assert_eq!(empty.context_id(), None);

        let wrong_type: TaskSubmitResponse = serde_json::from_value(json!({
            "status": "processing",
            "data": {"context_id": 7}
        }))
        .unwrap();
        assert_eq!(wrong_type.context_id(), None);
    }

    #[test]
    fn test_message_defaults_to_none() {
        let response: TaskSubmitResponse =
            serde_json::from_value(json!({"status": "error"})).unwrap();
        assert_eq!(response.message, None);
        assert_eq!(response.data, None);
    }
}
