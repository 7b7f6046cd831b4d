//! Context polling endpoint

use crate::TaskClient;
use crate::error::{ClientError, Result};
use pulse_core::domain::task::TaskContext;

impl TaskClient {
    /// Read the context resource for an asynchronous task
    ///
    /// A context that no longer exists (expired or evicted) is reported as
    /// [`ClientError::NotFound`] so callers can distinguish it from other
    /// transport failures.
    ///
    /// # Arguments
    /// * `context_id` - The context id announced by a `processing` submission
    ///
    /// # Returns
    /// The current context snapshot
    pub async fn get_context(&self, context_id: &str) -> Result<TaskContext> {
        let url = format!("{}/api/context/{}", self.base_url, context_id);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(context_id.to_string()));
        }

        self.handle_response(response).await
    }
}
