// ── RemoteFileDataSource – read-only lookups ─────────────────────────────────

use crate::resource::types::{RemoteFileQuery, RemoteFileState};
use chrono::Utc;
use log::info;
use sftpstate_core::{FileError, FileResult};
use sftpstate_sftp::sftp::{Connect, FileTransfer, StatOutcome};

/// Read-only view of a remote file. Unlike [`FileResource`], a data source
/// holds no lifecycle state; every read re-observes the remote side from
/// scratch.
///
/// [`FileResource`]: crate::resource::file::FileResource
pub struct RemoteFileDataSource<C: Connect> {
    connector: C,
    query: RemoteFileQuery,
}

impl<C: Connect> RemoteFileDataSource<C> {
    pub fn new(connector: C, query: RemoteFileQuery) -> Self {
        Self { connector, query }
    }

    pub fn query(&self) -> &RemoteFileQuery {
        &self.query
    }

    /// Fetch the remote file's identity, contents, size and modification
    /// time. A missing file is an error unless `allow_missing` is set, in
    /// which case the sentinel state is reported instead.
    ///
    /// Contents are reported as text; invalid UTF-8 sequences become
    /// U+FFFD while `size` keeps the remote byte count.
    pub fn read(&self) -> FileResult<RemoteFileState> {
        let mut transfer = self.connector.connect(&self.query.connection)?;

        let info = match transfer.stat(&self.query.path)? {
            StatOutcome::Found(info) => info,
            StatOutcome::Missing if self.query.allow_missing => {
                info!(
                    "remote file '{}' does not exist; reporting missing sentinel",
                    self.query.path
                );
                return Ok(RemoteFileState::missing(Utc::now()));
            }
            StatOutcome::Missing => return Err(FileError::not_found(&self.query.path)),
        };

        let bytes = transfer.read_to_bytes(&self.query.path)?;

        Ok(RemoteFileState {
            id: Some(info.base_name),
            contents: Some(String::from_utf8_lossy(&bytes).into_owned()),
            size: info.size as i64,
            last_modified: Some(info.modified.to_rfc3339()),
        })
    }
}
