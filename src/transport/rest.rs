//! REST transport over `reqwest`.

use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{HttpMethod, RequestDescriptor, RequestTransport};
use crate::error::ClientError;
use crate::session::Session;

/// Sends request descriptors to `<base_url><endpoint>` carrying the session headers.
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl RestClient {
    /// Build a client rooted at `base_url` (which ends in `/api/v1/`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: String, session: Session, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url, session })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait::async_trait]
impl RequestTransport for RestClient {
    async fn send(&self, request: RequestDescriptor) -> Result<Value, ClientError> {
        let RequestDescriptor { method, endpoint, params } = request;
        let headers = self.session.headers()?;
        let url = self.url(&endpoint);

        let builder = self.http.request(to_reqwest(method), &url).headers(headers);
        let builder = if method.uses_query() {
            builder.query(&query_pairs(&params))
        } else {
            builder.json(&params)
        };

        debug!(%method, %endpoint, "rest: sending request");
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = parse_body(&text);

        if !status.is_success() {
            warn!(%method, %endpoint, status = status.as_u16(), "rest: request failed");
            return Err(ClientError::Api {
                endpoint,
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        if reports_failure(&body) {
            warn!(%method, %endpoint, status = status.as_u16(), "rest: platform reported failure");
            return Err(ClientError::Api {
                endpoint,
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(body)
    }
}

fn to_reqwest(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Flatten parameters into query pairs.
///
/// Strings are sent verbatim, nulls are skipped, and every other value
/// (numbers, booleans, `sort`/`fields`/`query` objects) is sent as JSON text.
pub(crate) fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key.clone(), s.clone())),
            other => Some((key.clone(), other.to_string())),
        })
        .collect()
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

fn reports_failure(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool) == Some(false)
        || body.get("status").and_then(Value::as_str) == Some("error")
}

pub(crate) fn error_message(body: &Value) -> String {
    for key in ["message", "error", "reason"] {
        if let Some(message) = body.get(key).and_then(Value::as_str).filter(|m| !m.is_empty()) {
            return message.to_owned();
        }
    }
    match body {
        Value::Null => "empty response".to_owned(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "rest_test.rs"]
mod tests;
