//! Metadata extraction collaborator.

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tracing::debug;

use attachhub_core::error::{AppError, ErrorKind};
use attachhub_core::result::AppResult;
use attachhub_core::traits::ByteStream;
use attachhub_file::data::{FileData, MetadataMap};

use crate::context::RefreshContext;

/// Trait for metadata extraction routines.
///
/// Extraction reads the file's content stream and returns a mapping of
/// metadata keys to values. Failures surface as `Extraction` errors and
/// abort the refresh before any state is touched.
#[async_trait]
pub trait MetadataExtractor: Send + Sync + 'static {
    /// Extract metadata for a file from its content stream.
    async fn extract(
        &self,
        data: &FileData,
        content: &mut ByteStream,
        context: &RefreshContext,
    ) -> AppResult<MetadataMap>;
}

/// Default extractor: content size, SHA-256 checksum, and a MIME type
/// guessed from the file extension.
///
/// The `"checksums"` hint (an array of algorithm names) controls whether
/// the checksum is computed; an absent hint means compute it.
#[derive(Debug, Clone)]
pub struct BasicExtractor {
    detect_mime: bool,
}

impl BasicExtractor {
    /// Create an extractor with MIME detection enabled.
    pub fn new() -> Self {
        Self { detect_mime: true }
    }

    /// Enable or disable extension-based MIME detection.
    pub fn with_mime_detection(mut self, detect_mime: bool) -> Self {
        self.detect_mime = detect_mime;
        self
    }
}

impl Default for BasicExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataExtractor for BasicExtractor {
    async fn extract(
        &self,
        data: &FileData,
        content: &mut ByteStream,
        context: &RefreshContext,
    ) -> AppResult<MetadataMap> {
        let want_sha256 = match context.hint("checksums") {
            Some(Value::Array(algorithms)) => algorithms.iter().any(|a| a == "sha256"),
            _ => true,
        };

        let mut size: u64 = 0;
        let mut hasher = want_sha256.then(Sha256::new);

        while let Some(chunk) = content.next().await {
            let chunk = chunk.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Extraction,
                    format!("content read failed while extracting '{}'", data.storage_path),
                    e,
                )
            })?;
            size += chunk.len() as u64;
            if let Some(hasher) = hasher.as_mut() {
                hasher.update(&chunk);
            }
        }

        let mut metadata = MetadataMap::new();
        metadata.insert("size".into(), json!(size));
        if let Some(hasher) = hasher {
            metadata.insert("checksum_sha256".into(), json!(hex::encode(hasher.finalize())));
        }
        if self.detect_mime {
            if let Some(mime) = data.extension().as_deref().and_then(mime_for_extension) {
                metadata.insert("mime_type".into(), json!(mime));
            }
        }

        debug!(path = %data.storage_path, size, "Extracted basic metadata");
        Ok(metadata)
    }
}

/// Minimal extension → MIME table for common attachment types.
fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures::stream;

    fn stream_of(chunks: Vec<Bytes>) -> ByteStream {
        Box::pin(stream::iter(chunks.into_iter().map(Ok)))
    }

    #[tokio::test]
    async fn test_extracts_size_checksum_and_mime() {
        let data = FileData::new("uploads/notes.txt");
        let mut content = stream_of(vec![
            Bytes::from_static(b"hello "),
            Bytes::from_static(b"world"),
        ]);

        let extracted = BasicExtractor::new()
            .extract(&data, &mut content, &RefreshContext::new())
            .await
            .unwrap();

        assert_eq!(extracted.get("size"), Some(&json!(11)));
        // SHA-256 of "hello world".
        assert_eq!(
            extracted.get("checksum_sha256"),
            Some(&json!(
                "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
            ))
        );
        assert_eq!(extracted.get("mime_type"), Some(&json!("text/plain")));
    }

    #[tokio::test]
    async fn test_checksums_hint_can_skip_the_digest() {
        let data = FileData::new("uploads/blob.bin");
        let mut content = stream_of(vec![Bytes::from_static(b"abc")]);

        let context = RefreshContext::new().with_hint("checksums", json!([]));
        let extracted = BasicExtractor::new()
            .extract(&data, &mut content, &context)
            .await
            .unwrap();

        assert_eq!(extracted.get("size"), Some(&json!(3)));
        assert!(!extracted.contains_key("checksum_sha256"));
    }

    #[tokio::test]
    async fn test_unknown_extension_yields_no_mime() {
        let data = FileData::new("uploads/archive.xyz");
        let mut content = stream_of(vec![]);

        let extracted = BasicExtractor::new()
            .extract(&data, &mut content, &RefreshContext::new())
            .await
            .unwrap();

        assert!(!extracted.contains_key("mime_type"));
        assert_eq!(extracted.get("size"), Some(&json!(0)));
    }

    #[tokio::test]
    async fn test_stream_error_surfaces_as_extraction_error() {
        let data = FileData::new("uploads/broken.txt");
        let mut content: ByteStream = Box::pin(stream::iter(vec![
            Ok(Bytes::from_static(b"ok")),
            Err(std::io::Error::other("wire cut")),
        ]));

        let err = BasicExtractor::new()
            .extract(&data, &mut content, &RefreshContext::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Extraction);
    }
}
