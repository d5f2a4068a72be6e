use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML or has unknown keys.
    #[error("failed to parse config '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yml::Error,
    },

    /// The companion suffix would not produce a legal type name.
    #[error("proxy suffix '{suffix}' is not a valid identifier suffix")]
    InvalidSuffix { suffix: String },
}

/// Errors raised while writing generated sources.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The output directory could not be created.
    #[error("failed to create output directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two subjects would be written to the same file.
    #[error("subjects '{first}' and '{second}' both generate '{hint_name}'")]
    DuplicateHintName {
        hint_name: String,
        first: String,
        second: String,
    },

    /// A generated file could not be written.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
