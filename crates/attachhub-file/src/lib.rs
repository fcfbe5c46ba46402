//! # attachhub-file
//!
//! The in-memory representation of one stored file: the immutable
//! [`FileData`] record, the [`UploadedFileHandle`] wrapper that carries
//! an optional buffered content stream, and the [`ContentSource`]
//! resolution that decides where refresh operations read content from.

pub mod data;
pub mod handle;
pub mod source;

pub use data::{FileData, MetadataMap};
pub use handle::UploadedFileHandle;
pub use source::ContentSource;
