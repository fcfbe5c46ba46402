//! Content store configuration.

use serde::{Deserialize, Serialize};

/// Content store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Root path for locally stored file content.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Default store to resolve handle addresses against.
    #[serde(default = "default_store")]
    pub default_store: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            default_store: default_store(),
        }
    }
}

fn default_root_path() -> String {
    "./data/storage".to_string()
}

fn default_store() -> String {
    "local".to_string()
}
