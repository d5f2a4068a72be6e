use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading declaration manifests.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading a manifest (or canonicalizing its path) failed.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid YAML or does not match the manifest schema.
    #[error("failed to parse '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yml::Error,
    },

    /// A path import could not be found next to the importing file or in any include directory.
    #[error("import '{import}' not found relative to '{importer}' or in include directories")]
    ImportNotFound { import: String, importer: PathBuf },

    /// Two fragments of the same subject disagree on something that must match.
    #[error("fragments of '{reference}' disagree on {what}: '{first}' vs '{second}'")]
    FragmentMismatch {
        reference: String,
        what: &'static str,
        first: String,
        second: String,
    },
}
