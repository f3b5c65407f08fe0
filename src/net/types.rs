//! Wire types shared with the blog API.

use serde::{Deserialize, Serialize};

/// One entry of the user list. The server owns the shape, so the record is
/// kept as raw JSON and handed to views untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(pub serde_json::Value);

impl UserRecord {
    /// Look up a top-level field, if the record is a JSON object.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }
}

impl From<serde_json::Value> for UserRecord {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Body of `POST /api/verify-token`.
#[derive(Debug, Serialize)]
pub(crate) struct VerifyTokenRequest<'a> {
    pub token: &'a str,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
