//! Backend seam for the task runner
//!
//! The runner talks to the backend through this trait so tests can drive it
//! with in-process doubles while production code uses [`TaskClient`].

use async_trait::async_trait;

use crate::TaskClient;
use crate::error::Result;
use pulse_core::domain::task::TaskContext;
use pulse_core::dto::task::{TaskRequest, TaskSubmitResponse};

/// Backend operations the task runner depends on
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Submit a task for execution
    async fn submit_task(&self, req: &TaskRequest) -> Result<TaskSubmitResponse>;

    /// Read the context resource for an asynchronous task
    async fn get_context(&self, context_id: &str) -> Result<TaskContext>;
}

#[async_trait]
impl TaskApi for TaskClient {
    async fn submit_task(&self, req: &TaskRequest) -> Result<TaskSubmitResponse> {
        TaskClient::submit_task(self, req).await
    }

    async fn get_context(&self, context_id: &str) -> Result<TaskContext> {
        TaskClient::get_context(self, context_id).await
    }
}
