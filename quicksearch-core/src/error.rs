/// Structured error types for quicksearch-core.
///
/// Uses `thiserror` so data sources and the CLI can match on variants.
/// The binary (quicksearch-cli) wraps these in `anyhow` at its edges.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Message shown when a request fails below the data source's own protocol.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while fetching data.";

/// Message shown when a source reports failure without saying why.
pub const NO_RESULTS_MESSAGE: &str = "No results found.";

/// Outcome of a data source call that did not produce items.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The source answered, but reported no matches or an invalid query
    #[error("{message}")]
    Domain { message: String },

    /// Network, HTTP, or body decoding failure
    #[error("transport failure: {reason}")]
    Transport { reason: String },

    /// The request was cancelled before it resolved
    #[error("request cancelled")]
    Cancelled,
}

/// Result type alias for data source calls
pub type SourceResult<T> = std::result::Result<T, SourceError>;

impl SourceError {
    /// Create a domain error carrying the source's own message
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// Config file is not valid TOML for [`SearchConfig`](crate::SearchConfig)
    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A value is present but outside its allowed range
    #[error("Invalid value for '{key}': {reason}")]
    Invalid { key: String, reason: String },
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    /// Create an I/O error for a config path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid value error
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
