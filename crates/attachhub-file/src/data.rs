//! Uploaded file record data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use attachhub_core::types::FileId;

/// Arbitrary string-keyed metadata for a stored file (size, MIME type,
/// checksums, and anything extraction plugins add).
pub type MetadataMap = serde_json::Map<String, Value>;

/// One stored file's record.
///
/// `FileData` is an immutable snapshot: refresh operations never mutate
/// it in place, they build a replacement and swap the handle's `Arc`.
/// Readers holding the previous snapshot keep seeing consistent data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileData {
    /// Unique file identifier.
    pub id: FileId,
    /// The address of the content within the store.
    pub storage_path: String,
    /// File metadata. Always present, possibly empty.
    #[serde(default)]
    pub metadata: MetadataMap,
    /// When the file was recorded as uploaded.
    pub uploaded_at: DateTime<Utc>,
}

impl FileData {
    /// Create a new record with empty metadata.
    pub fn new(storage_path: impl Into<String>) -> Self {
        Self {
            id: FileId::new(),
            storage_path: storage_path.into(),
            metadata: MetadataMap::new(),
            uploaded_at: Utc::now(),
        }
    }

    /// Create a new record with the given metadata.
    pub fn with_metadata(storage_path: impl Into<String>, metadata: MetadataMap) -> Self {
        Self {
            metadata,
            ..Self::new(storage_path)
        }
    }

    /// File size in bytes, if recorded.
    pub fn size(&self) -> Option<u64> {
        self.metadata.get("size").and_then(Value::as_u64)
    }

    /// MIME type, if recorded.
    pub fn mime_type(&self) -> Option<&str> {
        self.metadata.get("mime_type").and_then(Value::as_str)
    }

    /// SHA-256 checksum of the content, if recorded.
    pub fn checksum_sha256(&self) -> Option<&str> {
        self.metadata.get("checksum_sha256").and_then(Value::as_str)
    }

    /// The file name portion of the storage path, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.storage_path.rsplit('/').next().filter(|n| !n.is_empty())
    }

    /// The file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name()?;
        name.rsplit('.')
            .next()
            .filter(|ext| *ext != name)
            .map(|ext| ext.to_lowercase())
    }
}
