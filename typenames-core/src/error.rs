//! Error types for typenames-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while building watcher configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `watchDir` or `suffix` was empty.
    #[error("`watchDir` and `suffix` options are required.")]
    MissingRequired,

    /// Underlying I/O failure reading a config file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load: includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The config file declared no watchers.
    #[error("config at {path} declares no watchers")]
    NoWatchers { path: PathBuf },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
