//! Data source and gateway error types.

use std::path::PathBuf;
use std::time::Duration;

use cooling_commerce::CommerceError;
use cooling_store::StoreError;
use thiserror::Error;

/// Errors from loading catalog documents or forwarding submissions.
#[derive(Error, Debug)]
pub enum DataError {
    /// The document could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document was read but is not valid for its shape.
    #[error("Failed to parse {document}: {message}")]
    Parse {
        document: &'static str,
        message: String,
    },

    /// A single attempt ran past its deadline.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl DataError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            DataError::Timeout(_) => true,
            DataError::Io { source, .. } => !matches!(
                source.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
            ),
            _ => false,
        }
    }
}

/// Result type for data operations.
pub type DataResult<T> = Result<T, DataError>;
