//! Pagination, sort, and filter parameters for listing endpoints.
//!
//! Unset fields are `None` and never forwarded, so the server applies its own
//! defaults. An explicit `0` is a value, not an absence.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// e.g. `{"name": 1}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,
    /// e.g. `{"name": 1, "_id": 0}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,
    /// Mongo-style selector, e.g. `{"name": {"$regex": "dev"}}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
}

impl PageQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Value) -> Self {
        self.sort = Some(sort);
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Value) -> Self {
        self.fields = Some(fields);
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: Value) -> Self {
        self.query = Some(query);
        self
    }

    /// Request parameters for exactly the fields that were set.
    #[must_use]
    pub fn to_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        if let Some(offset) = self.offset {
            params.insert("offset".to_owned(), Value::from(offset));
        }
        if let Some(count) = self.count {
            params.insert("count".to_owned(), Value::from(count));
        }
        if let Some(sort) = &self.sort {
            params.insert("sort".to_owned(), sort.clone());
        }
        if let Some(fields) = &self.fields {
            params.insert("fields".to_owned(), fields.clone());
        }
        if let Some(query) = &self.query {
            params.insert("query".to_owned(), query.clone());
        }
        params
    }
}

#[cfg(test)]
#[path = "page_query_test.rs"]
mod tests;
