//! Outgoing and incoming webhooks (`integrations.*`).

use serde_json::Value;

use super::{dispatch, object_params};
use crate::error::ClientError;
use crate::transport::HttpMethod;

facade! {
    Integration {
        fn list() -> Get "integrations.list" [page];
        /// `integration_type` is e.g. `"webhook-outgoing"`.
        fn remove(integration_type: &str => "type", integration_id: &str => "integrationId") -> Post "integrations.remove";
    }
}

impl Integration {
    /// Create an integration from its definition object
    /// (`type`, `name`, `event`, `urls`, `channel`, ...).
    ///
    /// # Errors
    ///
    /// Returns the transport or platform error for this call.
    pub async fn create(&self, integration: &Value) -> Result<Value, ClientError> {
        dispatch(self.transport.as_ref(), HttpMethod::Post, "integrations.create", object_params(integration)).await
    }
}

#[cfg(test)]
#[path = "integration_test.rs"]
mod tests;
