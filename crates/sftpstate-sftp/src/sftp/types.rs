// ── Types ─────────────────────────────────────────────────────────────────────

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sftpstate_core::{FileError, FileResult};

/// Metadata for a remote file, derived from an SFTP stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFileInfo {
    /// Base name of the remote path; doubles as the resource identity.
    pub base_name: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// Outcome of a remote stat: the path either resolves, or is known not to
/// exist. Transport failures are errors, not outcomes.
#[derive(Debug, Clone)]
pub enum StatOutcome {
    Found(RemoteFileInfo),
    Missing,
}

impl StatOutcome {
    /// Unwrap the metadata, turning `Missing` into a stat error for call
    /// sites where the file must exist.
    pub fn required(self, path: &str) -> FileResult<RemoteFileInfo> {
        match self {
            Self::Found(info) => Ok(info),
            Self::Missing => Err(FileError::not_found(path)),
        }
    }
}

/// Direction of the mirrored relationship: download copies remote to
/// local-or-buffer, upload copies local-or-buffer to remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TransferDirection {
    #[default]
    Download,
    Upload,
}
