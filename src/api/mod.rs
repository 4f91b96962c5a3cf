//! Command facades, one per platform API area.
//!
//! DESIGN
//! ======
//! Every REST endpoint wrapper has the same shape: take the required
//! parameters (plus a [`PageQuery`] for listings), build a flat parameter
//! map under the platform's wire names, and hand a [`RequestDescriptor`] to
//! the shared request transport. The [`facade!`] macro generates those
//! wrappers from a per-domain table; only endpoints with an irregular shape
//! (history, object payloads, path-style ids) are written by hand.
//!
//! No facade validates its inputs. Bad parameters come back as
//! [`ClientError::Api`] from the platform.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::transport::{HttpMethod, RequestDescriptor, RequestTransport};

/// Generate a facade struct and its endpoint methods from a table.
///
/// Each entry reads
/// `fn name(arg: Type => "wireName", ...) -> Verb "endpoint" [page];`
/// where the trailing `[page]` adds a `&PageQuery` argument.
macro_rules! facade {
    (
        $(#[$outer:meta])*
        $name:ident {
            $(
                $(#[$doc:meta])*
                fn $method:ident($($arg:ident: $ty:ty => $wire:literal),* $(,)?) -> $verb:ident $endpoint:literal $([$paged:ident])?;
            )*
        }
    ) => {
        $(#[$outer])*
        #[derive(Clone)]
        pub struct $name {
            transport: std::sync::Arc<dyn $crate::transport::RequestTransport>,
        }

        impl $name {
            pub(crate) fn new(transport: std::sync::Arc<dyn $crate::transport::RequestTransport>) -> Self {
                Self { transport }
            }

            $(
                $(#[$doc])*
                ///
                /// # Errors
                ///
                /// Returns the transport or platform error for this call.
                pub async fn $method(
                    &self,
                    $($arg: $ty,)*
                    $($paged: &$crate::api::PageQuery,)?
                ) -> Result<serde_json::Value, $crate::error::ClientError> {
                    #[allow(unused_mut)]
                    let mut params = serde_json::Map::new();
                    $( params.insert($wire.to_owned(), serde_json::to_value($arg)?); )*
                    $( params.extend($paged.to_params()); )?
                    $crate::api::dispatch(
                        self.transport.as_ref(),
                        $crate::transport::HttpMethod::$verb,
                        $endpoint,
                        params,
                    )
                    .await
                }
            )*
        }
    };
}

pub mod authentication;
pub mod channels;
pub mod chat;
pub mod groups;
pub mod im;
pub mod integration;
pub mod miscellaneous;
pub mod page_query;
pub mod realtime;
pub mod settings;
pub mod users;

pub use page_query::PageQuery;

/// Send one request through the shared transport.
pub(crate) async fn dispatch(
    transport: &dyn RequestTransport,
    method: HttpMethod,
    endpoint: impl Into<String>,
    params: Map<String, Value>,
) -> Result<Value, ClientError> {
    transport
        .send(RequestDescriptor::new(method, endpoint, params))
        .await
}

/// Use the fields of a JSON object as request parameters; anything else yields none.
pub(crate) fn object_params(value: &Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

/// Time-window options for room history endpoints. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryOptions {
    /// Newest message timestamp (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<String>,
    /// Oldest message timestamp (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclusive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unreads: Option<bool>,
}

impl HistoryOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_latest(mut self, latest: impl Into<String>) -> Self {
        self.latest = Some(latest.into());
        self
    }

    #[must_use]
    pub fn with_oldest(mut self, oldest: impl Into<String>) -> Self {
        self.oldest = Some(oldest.into());
        self
    }

    #[must_use]
    pub fn with_inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = Some(inclusive);
        self
    }

    #[must_use]
    pub fn with_unreads(mut self, unreads: bool) -> Self {
        self.unreads = Some(unreads);
        self
    }

    #[must_use]
    pub fn to_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        if let Some(latest) = &self.latest {
            params.insert("latest".to_owned(), Value::from(latest.as_str()));
        }
        if let Some(oldest) = &self.oldest {
            params.insert("oldest".to_owned(), Value::from(oldest.as_str()));
        }
        if let Some(inclusive) = self.inclusive {
            params.insert("inclusive".to_owned(), Value::from(inclusive));
        }
        if let Some(unreads) = self.unreads {
            params.insert("unreads".to_owned(), Value::from(unreads));
        }
        params
    }
}

/// `roomId` merged with history window and page query parameters.
pub(crate) fn history_params(room_id: &str, history: &HistoryOptions, page: &PageQuery) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert("roomId".to_owned(), Value::from(room_id));
    params.extend(history.to_params());
    params.extend(page.to_params());
    params
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
