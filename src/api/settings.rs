//! Server settings. Individual settings are addressed by path
//! (`settings/<id>`) rather than by parameter.

use serde_json::{Map, Value};

use super::dispatch;
use crate::error::ClientError;
use crate::transport::HttpMethod;

facade! {
    Settings {
        fn list() -> Get "settings" [page];
    }
}

impl Settings {
    /// # Errors
    ///
    /// Returns the transport or platform error for this call.
    pub async fn get(&self, id: &str) -> Result<Value, ClientError> {
        dispatch(self.transport.as_ref(), HttpMethod::Get, format!("settings/{id}"), Map::new()).await
    }

    /// # Errors
    ///
    /// Returns the transport or platform error for this call.
    pub async fn update(&self, id: &str, value: &Value) -> Result<Value, ClientError> {
        let mut params = Map::new();
        params.insert("value".to_owned(), value.clone());
        dispatch(self.transport.as_ref(), HttpMethod::Post, format!("settings/{id}"), params).await
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
