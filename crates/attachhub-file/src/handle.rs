//! The uploaded file handle.

use std::sync::Arc;

use attachhub_core::traits::ByteStream;

use crate::data::{FileData, MetadataMap};

/// Handle to one stored file.
///
/// Wraps the immutable [`FileData`] snapshot together with an optional
/// open content stream. The stream is present only while content is
/// actively buffered (for example mid-upload); refresh operations read
/// from it directly instead of making another round-trip to the store.
pub struct UploadedFileHandle {
    /// Current record snapshot. Replaced wholesale on refresh; clones of
    /// the previous `Arc` held elsewhere stay valid.
    pub data: Arc<FileData>,
    /// Open content stream, if the content is currently buffered.
    pub io: Option<ByteStream>,
}

impl UploadedFileHandle {
    /// Create a handle with no buffered content.
    pub fn new(data: FileData) -> Self {
        Self {
            data: Arc::new(data),
            io: None,
        }
    }

    /// Create a handle whose content is currently buffered in `io`.
    pub fn with_io(data: FileData, io: ByteStream) -> Self {
        Self {
            data: Arc::new(data),
            io: Some(io),
        }
    }

    /// Whether the handle currently buffers its content.
    pub fn is_buffered(&self) -> bool {
        self.io.is_some()
    }

    /// The current metadata mapping.
    pub fn metadata(&self) -> &MetadataMap {
        &self.data.metadata
    }

    /// Replace the record snapshot. The handle keeps its identity, only
    /// the internal data reference changes.
    pub fn replace_data(&mut self, data: FileData) {
        self.data = Arc::new(data);
    }

    /// Detach and return the buffered content stream, if any.
    pub fn detach_io(&mut self) -> Option<ByteStream> {
        self.io.take()
    }
}

impl std::fmt::Debug for UploadedFileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFileHandle")
            .field("data", &self.data)
            .field("buffered", &self.io.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn empty_stream() -> ByteStream {
        Box::pin(stream::empty())
    }

    #[test]
    fn test_buffered_flag_tracks_io() {
        let mut handle = UploadedFileHandle::with_io(FileData::new("x/y.bin"), empty_stream());
        assert!(handle.is_buffered());
        assert!(handle.detach_io().is_some());
        assert!(!handle.is_buffered());
    }

    #[test]
    fn test_replace_data_preserves_prior_snapshot() {
        let mut handle = UploadedFileHandle::new(FileData::new("x/y.bin"));
        let before = handle.data.clone();

        let mut next = (*handle.data).clone();
        next.metadata.insert("size".into(), serde_json::json!(7));
        handle.replace_data(next);

        assert!(before.metadata.is_empty());
        assert_eq!(handle.data.size(), Some(7));
    }
}
