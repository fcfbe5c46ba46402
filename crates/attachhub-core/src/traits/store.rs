//! Content store trait for pluggable file storage backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading file contents.
///
/// Dropping the stream releases whatever underlying resource backs it
/// (file descriptor, network response body), so a stream acquired inside
/// a scope is released on every exit path of that scope.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for addressable content stores.
///
/// The store is an external collaborator: Attachhub never writes through
/// this trait, it only opens read streams to recompute metadata. The
/// trait is defined here in `attachhub-core` and implemented by the host
/// system (local filesystem, object storage, test doubles).
#[async_trait]
pub trait ContentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the store type name (e.g., "local", "s3", "memory").
    fn store_type(&self) -> &str;

    /// Open a read stream for the content at the given address.
    ///
    /// Fails with a `NotFound` error when no content exists at the
    /// address, and a `Storage` error for any other I/O failure.
    async fn open_read(&self, address: &str) -> AppResult<ByteStream>;
}
