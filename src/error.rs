//! Error types for store operations.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Fatal, per-invocation failures. Per-line problems are never surfaced here;
/// they are logged and skipped by the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Permission denied when accessing {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize record for {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Classify an I/O error raised while touching `path`.
    pub fn io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound { path },
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied { path },
            _ => StoreError::Io { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_not_found_and_permission_denied() {
        let path = Path::new("data/bugs.jsonl");
        let err = StoreError::io(path, io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.to_string(), "File not found: data/bugs.jsonl");

        let err = StoreError::io(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(err.to_string(), "Permission denied when accessing data/bugs.jsonl");

        let err = StoreError::io(path, io::Error::other("disk on fire"));
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(err.to_string().contains("disk on fire"));
    }
}
