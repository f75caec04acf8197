use serde::{Deserialize, Serialize};

/// Body of the review call: `{ "code": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub code: String,
}

impl ReviewRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}
