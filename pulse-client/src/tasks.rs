//! Task submission endpoint

use crate::TaskClient;
use crate::error::Result;
use pulse_core::dto::task::{TaskRequest, TaskSubmitResponse};

impl TaskClient {
    /// Submit an agent task for execution
    ///
    /// The response settles the call immediately (`success`, `complete`,
    /// `error`, `skipped`, `warning`) or announces an asynchronous job via
    /// `processing` plus a context id to poll.
    ///
    /// # Arguments
    /// * `req` - The task submission request
    ///
    /// # Returns
    /// The immediate submission response
    ///
    /// # Example
    /// ```no_run
    /// # use pulse_client::TaskClient;
    /// # use pulse_core::dto::task::TaskRequest;
    /// # use std::collections::HashMap;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = TaskClient::new("http://localhost:8080");
    /// let response = client.submit_task(&TaskRequest {
    ///     task: "scout_anchors".to_string(),
    ///     user_id: "u1".to_string(),
    ///     params: HashMap::new(),
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit_task(&self, req: &TaskRequest) -> Result<TaskSubmitResponse> {
        let url = format!("{}/api/run", self.base_url);
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }
}
