//! Metadata extraction configuration.

use serde::{Deserialize, Serialize};

/// Metadata extraction configuration.
///
/// These settings are carried into refresh calls as extraction hints;
/// the extractor decides what to do with them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Checksum algorithms to compute during extraction.
    #[serde(default = "default_checksum_algorithms")]
    pub checksum_algorithms: Vec<String>,
    /// Whether to guess MIME types from file extensions.
    #[serde(default = "default_true")]
    pub detect_mime: bool,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            checksum_algorithms: default_checksum_algorithms(),
            detect_mime: default_true(),
        }
    }
}

fn default_checksum_algorithms() -> Vec<String> {
    vec!["sha256".to_string()]
}

fn default_true() -> bool {
    true
}
