//! Error taxonomy for sync operations
//!
//! Functions return `eyre::Result`; these variants are raised where a caller
//! (or a test) needs to tell failure kinds apart via `Report::downcast_ref`.

use std::path::PathBuf;
use thiserror::Error;

/// Typed failures of the export/import codec and its collaborators
#[derive(Error, Debug)]
pub enum SyncError {
    /// A required identifier or setting is missing
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The backend was unreachable or answered with an unexpected shape
    #[error("transport error: {0}")]
    Transport(String),

    /// A YAML file in the tree could not be decoded
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A node key could not be encoded into, or decoded from, a file name
    #[error("invalid node key '{key}': {reason}")]
    NodeKey { key: String, reason: &'static str },

    /// Two records resolved to the same file under the `fail` policy
    #[error("name collision at {}", path.display())]
    NameCollision { path: PathBuf },

    /// A filesystem operation failed
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
