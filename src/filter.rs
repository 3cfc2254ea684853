use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque, pre-encoded filter condition for a single field.
///
/// The encoding grammar belongs to the filter-expression collaborator that
/// produced the value (e.g. `"status__eq__active"`). The searcher stores
/// these keyed by field name, merges them key-wise against the baseline, and
/// forwards them to the executor without ever inspecting the inner shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterField(String);

impl FilterField {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded condition, exactly as supplied.
    pub fn encoded(&self) -> &str {
        &self.0
    }
}

impl From<String> for FilterField {
    fn from(encoded: String) -> Self {
        Self(encoded)
    }
}

impl From<&str> for FilterField {
    fn from(encoded: &str) -> Self {
        Self(encoded.to_string())
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
