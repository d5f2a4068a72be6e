/* Generator options and the optional YAML config file layered under command-line flags */

use crate::error::ConfigError;
use crate::model::eligibility::is_valid_identifier;
use serde_derive::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PROXY_SUFFIX: &str = "Proxy";

/// Options that change generated text; part of the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorOptions {
    /* Emit `implicit operator XProxy(X target)` */
    pub implicit_conversion: bool,
    pub proxy_suffix: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            implicit_conversion: false,
            proxy_suffix: DEFAULT_PROXY_SUFFIX.to_string(),
        }
    }
}

/// Contents of a `proxy-gen.yaml` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub implicit_conversion: Option<bool>,
    #[serde(default)]
    pub proxy_suffix: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&path.display().to_string(), &contents)
    }

    pub fn from_yaml(origin: &str, contents: &str) -> Result<Self, ConfigError> {
        /* An empty file is a valid config with nothing set */
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(contents).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Layers the file's values over `options`.
    pub fn apply(&self, options: &mut GeneratorOptions) -> Result<(), ConfigError> {
        if let Some(implicit_conversion) = self.implicit_conversion {
            options.implicit_conversion = implicit_conversion;
        }
        if let Some(suffix) = &self.proxy_suffix {
            validate_suffix(suffix)?;
            options.proxy_suffix = suffix.clone();
        }
        Ok(())
    }
}

/// Builds the options for a run: defaults, then `config`, then command-line flags.
pub fn resolve_options(config: Option<&ConfigFile>, implicit_conversion: bool) -> Result<GeneratorOptions, ConfigError> {
    let mut options = GeneratorOptions::default();
    if let Some(config) = config {
        config.apply(&mut options)?;
    }
    if implicit_conversion {
        options.implicit_conversion = true;
    }
    validate_suffix(&options.proxy_suffix)?;
    Ok(options)
}

/* A suffix is appended to a legal identifier, so it only needs identifier continuation characters */
pub fn validate_suffix(suffix: &str) -> Result<(), ConfigError> {
    if suffix.is_empty() || !is_valid_identifier(&format!("_{}", suffix)) {
        return Err(ConfigError::InvalidSuffix {
            suffix: suffix.to_string(),
        });
    }
    Ok(())
}
