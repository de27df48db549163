//! Boundary validation of `documents.search` responses.

use crate::core::error::{Result, WikiSearchError};
use crate::core::types::SearchResponse;
use serde_json::Value;

/// Outcome of checking a response body against the expected shape
#[derive(Debug)]
pub enum ResponseShape {
    /// Body decoded into typed results
    Valid(SearchResponse),

    /// Body did not match; carries a short reason for logs
    Malformed(String),
}

impl ResponseShape {
    /// Classify a raw response body
    ///
    /// The body must be a JSON object with an array under `data`, and
    /// every entry must decode into a [`crate::core::types::SearchResult`].
    pub fn classify(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => return ResponseShape::Malformed(format!("body is not JSON: {e}")),
        };

        match value.get("data") {
            Some(Value::Array(_)) => {}
            Some(_) => return ResponseShape::Malformed("`data` is not an array".to_string()),
            None => return ResponseShape::Malformed("missing `data` field".to_string()),
        }

        match serde_json::from_value::<SearchResponse>(value) {
            Ok(response) => ResponseShape::Valid(response),
            Err(e) => ResponseShape::Malformed(format!("unexpected search result entry: {e}")),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ResponseShape::Valid(_))
    }

    /// Convert into a result, failing on a malformed shape
    pub fn into_result(self) -> Result<SearchResponse> {
        match self {
            ResponseShape::Valid(response) => Ok(response),
            ResponseShape::Malformed(reason) => {
                tracing::warn!(reason = %reason, "Unexpected response structure from Outline");
                Err(WikiSearchError::InvalidResponse(reason))
            }
        }
    }
}
