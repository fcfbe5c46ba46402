//! Content source resolution for refresh operations.

use crate::handle::UploadedFileHandle;

/// Where a refresh operation reads file content from.
///
/// Resolved exactly once per call, so the branch between "use the
/// already-open stream" and "fetch from the store" is an explicit value
/// rather than repeated state inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// The handle already buffers its content; read it directly.
    Buffered,
    /// Content must be fetched from the store at this address.
    Remote(String),
}

impl ContentSource {
    /// Resolve the content source for a handle.
    pub fn resolve(handle: &UploadedFileHandle) -> Self {
        if handle.is_buffered() {
            Self::Buffered
        } else {
            Self::Remote(handle.data.storage_path.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FileData;
    use attachhub_core::traits::ByteStream;
    use futures::stream;

    fn empty_stream() -> ByteStream {
        Box::pin(stream::empty())
    }

    #[test]
    fn test_buffered_handle_resolves_to_buffered() {
        let handle = UploadedFileHandle::with_io(FileData::new("a/b.txt"), empty_stream());
        assert_eq!(ContentSource::resolve(&handle), ContentSource::Buffered);
    }

    #[test]
    fn test_unbuffered_handle_resolves_to_remote_address() {
        let handle = UploadedFileHandle::new(FileData::new("a/b.txt"));
        assert_eq!(
            ContentSource::resolve(&handle),
            ContentSource::Remote("a/b.txt".to_string())
        );
    }
}
