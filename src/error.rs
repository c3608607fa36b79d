use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating or reading background reference tables.
#[derive(Debug, Error)]
pub enum BackgroundError {
    /// A reference table is not present at its expected location.
    #[error("resource `{name}` not found at {}", path.display())]
    ResourceNotFound { name: String, path: PathBuf },

    /// The tabular reader failed on the file (I/O or record framing).
    #[error("reading {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The file does not follow the fixed column layout of its table.
    #[error("{}: {message}", path.display())]
    Schema { path: PathBuf, message: String },

    #[error("reading config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl BackgroundError {
    pub(crate) fn schema(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        BackgroundError::Schema {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        BackgroundError::Csv {
            path: path.into(),
            source,
        }
    }

    /// Whether this error reports a missing reference table.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackgroundError::ResourceNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, BackgroundError>;
