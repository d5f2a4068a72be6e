//! Proxy Generation
//!
//! Builds the member model of each declared subject and renders a C#
//! companion struct that forwards every eligible property and method to
//! the wrapped instance through `UnsafeAccessor` bindings. Static subjects
//! are reported with `RFL0001` instead.

pub mod cache;
pub mod codegen;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod model;

// Re-export the entry points used by the command layer and tests
pub use cache::ProxyCache;
pub use codegen::{
    GeneratedSource, GenerationOutput, GenerationReport, ProxyUnit, generate, generate_subjects,
    write_sources,
};
pub use config::{ConfigFile, GeneratorOptions};
pub use diagnostics::{Diagnostic, Severity, UNSUPPORTED_STATIC_TYPE};
pub use error::{ConfigError, OutputError};
pub use model::{SubjectModel, extract};
