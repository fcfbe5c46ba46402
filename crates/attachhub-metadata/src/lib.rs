//! # attachhub-metadata
//!
//! Metadata refresh for uploaded file handles: re-runs extraction against
//! the file's current content and merges the result into the handle's
//! existing metadata without losing unrelated keys (read-repair).
//!
//! Content is read from the handle's own buffered stream when one is
//! open, otherwise fetched from the [`ContentStore`] collaborator.
//!
//! [`ContentStore`]: attachhub_core::traits::ContentStore

pub mod context;
pub mod extractor;
pub mod refresher;

pub use context::RefreshContext;
pub use extractor::{BasicExtractor, MetadataExtractor};
pub use refresher::MetadataRefresher;
