//! Reconciliation-specific error type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorised reconciliation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileError {
    pub kind: FileErrorKind,
    pub message: String,
    /// Path (remote or local) the failing operation was addressing, if any.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FileErrorKind {
    /// Missing or contradictory credentials, unparsable key material.
    /// Raised before any network I/O is attempted.
    InvalidConfig,
    /// TCP dial, SSH handshake, host-key or authentication failure that
    /// survived the whole retry budget.
    ConnectionFailed,
    /// Remote path lookup failure.
    StatFailed,
    /// Failure while moving bytes or removing a remote file.
    TransferFailed,
    /// Local filesystem failure (open / stat / remove).
    LocalIo,
}

pub type FileResult<T> = Result<T, FileError>;

// ── Construction helpers ─────────────────────────────────────────────

impl FileError {
    pub fn new(kind: FileErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    // ── Convenience constructors ─────────────────────────────

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(FileErrorKind::InvalidConfig, msg)
    }

    pub fn connection_failed(msg: impl Into<String>) -> Self {
        Self::new(FileErrorKind::ConnectionFailed, msg)
    }

    pub fn stat_failed(msg: impl Into<String>) -> Self {
        Self::new(FileErrorKind::StatFailed, msg)
    }

    pub fn transfer_failed(msg: impl Into<String>) -> Self {
        Self::new(FileErrorKind::TransferFailed, msg)
    }

    pub fn local_io(msg: impl Into<String>) -> Self {
        Self::new(FileErrorKind::LocalIo, msg)
    }

    /// Stat error for a remote path that does not exist, used wherever a
    /// missing file is *not* tolerated.
    pub fn not_found(path: &str) -> Self {
        Self::stat_failed(format!("remote file '{}' does not exist", path)).with_path(path)
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{:?} {}] {}", self.kind, path, self.message),
            None => write!(f, "[{:?}] {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for FileError {}

impl From<std::io::Error> for FileError {
    fn from(e: std::io::Error) -> Self {
        Self::local_io(e.to_string())
    }
}

impl From<FileError> for String {
    fn from(e: FileError) -> String {
        e.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_path() {
        let err = FileError::stat_failed("lookup failed").with_path("/srv/app.conf");
        assert_eq!(err.to_string(), "[StatFailed /srv/app.conf] lookup failed");

        let err = FileError::invalid_config("no password or private key has been specified");
        assert_eq!(
            err.to_string(),
            "[InvalidConfig] no password or private key has been specified"
        );
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&FileErrorKind::ConnectionFailed).unwrap();
        assert_eq!(json, "\"ConnectionFailed\"");
    }

    #[test]
    fn test_from_io_error_is_local_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: FileError = io.into();
        assert_eq!(err.kind, FileErrorKind::LocalIo);
        assert_eq!(err.message, "denied");
    }

    #[test]
    fn test_not_found_carries_path() {
        let err = FileError::not_found("/tmp/a.txt");
        assert_eq!(err.kind, FileErrorKind::StatFailed);
        assert_eq!(err.path.as_deref(), Some("/tmp/a.txt"));
    }
}
