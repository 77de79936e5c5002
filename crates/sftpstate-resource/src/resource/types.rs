// ── Types ─────────────────────────────────────────────────────────────────────

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sftpstate_sftp::sftp::TransferDirection;
use sftpstate_ssh::ssh::ConnectionConfig;
use std::collections::BTreeMap;

/// Identity sentinel reported when a tolerated-missing remote file is read.
pub const MISSING_ID: &str = "missing";

// ── Serde default helpers ────────────────────────────────────────────────────

fn default_missing_size() -> i64 {
    -1
}

// ── Declared state ───────────────────────────────────────────────────────────

/// Declared target state for one mirrored remote file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFileSpec {
    #[serde(flatten)]
    pub connection: ConnectionConfig,
    /// Remote file path.
    pub path: String,
    /// Local mirror path; when absent the contents live in memory.
    #[serde(default)]
    pub local_path: Option<String>,
    /// Declared in-memory contents, used when uploading without a mirror.
    #[serde(default)]
    pub contents: Option<String>,
    #[serde(default)]
    pub direction: TransferDirection,
    #[serde(default)]
    pub destroy_local_file: bool,
    #[serde(default)]
    pub destroy_remote_file: bool,
    /// Opaque replacement triggers; interpreted by the orchestrator only.
    #[serde(default)]
    pub triggers: BTreeMap<String, String>,
}

/// Data-source query: the read-only subset of a remote-file spec.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFileQuery {
    #[serde(flatten)]
    pub connection: ConnectionConfig,
    pub path: String,
    /// Report the sentinel state instead of an error when the remote file
    /// does not exist.
    #[serde(default)]
    pub allow_missing: bool,
    #[serde(default)]
    pub triggers: BTreeMap<String, String>,
}

// ── Observed state ───────────────────────────────────────────────────────────

/// Observed state of the mirrored file, fed back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFileState {
    /// Resource identity: the remote file's base name, [`MISSING_ID`] for
    /// a tolerated-missing read, or `None` while absent.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub contents: Option<String>,
    /// Size in bytes; -1 when the remote file is missing.
    #[serde(default = "default_missing_size")]
    pub size: i64,
    /// RFC 3339 timestamp.
    #[serde(default)]
    pub last_modified: Option<String>,
}

impl RemoteFileState {
    pub fn absent() -> Self {
        Self {
            id: None,
            contents: None,
            size: -1,
            last_modified: None,
        }
    }

    /// Sentinel state for a tolerated missing remote file: identity
    /// "missing", size -1, empty contents, last-modified = now.
    pub fn missing(now: DateTime<Utc>) -> Self {
        Self {
            id: Some(MISSING_ID.to_string()),
            contents: Some(String::new()),
            size: -1,
            last_modified: Some(now.to_rfc3339()),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.id.as_deref() == Some(MISSING_ID)
    }
}

/// Lifecycle phase of a reconciled resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourcePhase {
    Absent,
    Present,
    Tombstoned,
}

/// Result of a drift-detecting read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Remote state matches the declared state.
    Present,
    /// The file is gone or drifted; the resource was reset to absent and
    /// should be recreated.
    Vanished,
}
