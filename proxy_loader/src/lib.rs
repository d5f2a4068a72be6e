//! Declaration Manifest Loading
//!
//! This crate loads declaration manifests from disk, follows the path
//! imports between them, and merges the partial fragments of each subject
//! into a single declaration ready for member-model extraction.

pub mod error;
pub mod file;
pub mod merge;
pub mod resolver;

// Re-export commonly used types at the crate root
pub use error::LoadError;
pub use file::{DeclarationFile, ImportSource, ManifestMetadata};
pub use merge::SubjectMerger;
pub use resolver::DeclarationResolver;

// Re-export proxy_types for convenience
pub use proxy_types;
