//! Errors raised at the persistence boundary.
//!
//! Store operations never return these to their callers: a failed load falls
//! back to the empty state and a failed save is logged. They surface only
//! through the [`Storage`](crate::storage::Storage) trait itself.

use thiserror::Error;

/// Errors from reading or writing persisted store state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// State could not be encoded or decoded.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisted state was written by an incompatible version.
    #[error("stored version {found} does not match expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    /// Key cannot be used as a storage name.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

impl StorageError {
    pub(crate) fn io(key: &str, source: std::io::Error) -> Self {
        Self::Io {
            key: key.to_owned(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_key() {
        let err = StorageError::io(
            "smart-reading-cart",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = err.to_string();
        assert!(message.contains("smart-reading-cart"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_version_mismatch_message() {
        let err = StorageError::VersionMismatch {
            found: 3,
            expected: 0,
        };
        assert_eq!(err.to_string(), "stored version 3 does not match expected 0");
    }
}
