//! Error types for project loading.

use thiserror::Error;

/// Errors raised while reading a project from disk.
///
/// Import resolution itself never fails; an unresolvable import is `None`.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// IO error while reading a file.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// `foundry.toml` could not be decoded.
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// `package.json` could not be decoded.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A remapping line without `prefix=target`.
    #[error("invalid remapping: `{0}`")]
    InvalidRemapping(String),

    /// The project root is not a directory.
    #[error("project root not found: {0}")]
    RootNotFound(String),
}

impl ProjectError {
    /// Create an IO error for `path`.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ProjectResult<T> = Result<T, ProjectError>;
