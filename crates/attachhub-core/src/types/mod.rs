//! Shared type definitions.

pub mod id;

pub use id::FileId;
