//! Error types for docsee-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from config registry operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, disk full, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `docsee.yaml` did not exist at the expected path.
    #[error("no docsee.yaml found at {path}; run `docsee init` first")]
    NotFound { path: PathBuf },

    /// A source with the same name is already registered.
    #[error("source '{name}' already exists")]
    DuplicateSource { name: String },

    /// Two distinct names would produce the same block markers in the shared document.
    #[error("source name '{name}' collides with existing source '{existing}' (both use marker {marker})")]
    MarkerCollision {
        name: String,
        existing: String,
        marker: String,
    },

    /// The name cannot be used as a mirror directory name.
    #[error("invalid source name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// The configured mirror is not a direct child of the mirror directory.
    #[error("source '{name}' has local '{local}'; mirrors must live at ./.docsee/<name>")]
    UnsafeMirror { name: String, local: String },

    /// No source with the requested name is registered.
    #[error("source '{name}' not found in docsee.yaml")]
    SourceNotFound { name: String },
}

/// Convenience constructor for [`ConfigError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
