//! Core trait definitions consumed across Attachhub crates.

pub mod store;

pub use store::{ByteStream, ContentStore};
