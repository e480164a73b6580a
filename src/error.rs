//! Error types for the catalog store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failures raised while reading or writing the catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write catalog file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
