use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body the backend attaches to non-success responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// A required field was left empty at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("required field `{field}` is empty")]
pub struct MissingField {
    pub field: &'static str,
}

impl MissingField {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}
