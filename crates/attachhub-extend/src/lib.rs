//! # attachhub-extend
//!
//! The extension registry. Hosts bind each of the three fixed roles
//! ([`Role::Attachment`], [`Role::Attacher`], [`Role::UploadedFile`]) to a
//! base behavior bundle during a single-threaded configuration phase, then
//! register overlay bundles that add or override methods. Resolution walks
//! overlays newest-first, so the last registered bundle wins. Once sealed,
//! the registry rejects further changes and can be shared freely.

pub mod bundle;
pub mod registry;
pub mod role;

pub use bundle::{BehaviorBundle, BundleBuilder, FnMethod, MethodContext, RoleMethod};
pub use registry::{ExtensionRegistry, ModuleDef, RoleInstance};
pub use role::Role;
