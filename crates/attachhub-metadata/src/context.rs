//! Refresh context — opaque extraction hints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Hints passed through to the extractor, uninterpreted by the refresher
/// itself (e.g., which checksum algorithms to compute).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshContext {
    /// Hint key → value.
    #[serde(default)]
    pub hints: serde_json::Map<String, Value>,
}

impl RefreshContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hint to this context.
    pub fn with_hint(mut self, key: impl Into<String>, value: Value) -> Self {
        self.hints.insert(key.into(), value);
        self
    }

    /// Look up a hint by key.
    pub fn hint(&self, key: &str) -> Option<&Value> {
        self.hints.get(key)
    }
}
