// ── FileResource – create / read / delete reconciliation ─────────────────────

use crate::resource::types::{
    ReadOutcome, RemoteFileSpec, RemoteFileState, ResourcePhase,
};
use log::{info, warn};
use sftpstate_core::{FileError, FileResult};
use sftpstate_sftp::sftp::{
    Connect, FileTransfer, RemoteFileInfo, StatOutcome, TransferDirection,
};
use std::path::Path;

/// Reconciles one mirrored file against its declared spec.
///
/// A resource starts absent, becomes present after a successful create,
/// drops back to absent when a read detects drift, and is tombstoned by
/// delete. Every operation opens its own session and closes it before
/// returning; sessions are never shared or reused.
pub struct FileResource<C: Connect> {
    connector: C,
    spec: RemoteFileSpec,
    state: RemoteFileState,
    phase: ResourcePhase,
}

impl<C: Connect> FileResource<C> {
    pub fn new(connector: C, spec: RemoteFileSpec) -> Self {
        Self {
            connector,
            spec,
            state: RemoteFileState::absent(),
            phase: ResourcePhase::Absent,
        }
    }

    pub fn spec(&self) -> &RemoteFileSpec {
        &self.spec
    }

    pub fn state(&self) -> &RemoteFileState {
        &self.state
    }

    pub fn phase(&self) -> ResourcePhase {
        self.phase
    }

    /// Create the mirrored relationship: transfer according to the
    /// direction, stat the remote path, and record identity, size and
    /// modification time. Any failure surfaces without committing state.
    pub fn create(&mut self) -> FileResult<()> {
        let mut transfer = self.connector.connect(&self.spec.connection)?;

        let mut fetched: Option<String> = None;

        match self.spec.direction {
            TransferDirection::Download => {
                if let Some(local) = &self.spec.local_path {
                    transfer.download_to_path(&self.spec.path, Path::new(local))?;
                } else {
                    let bytes = transfer.read_to_bytes(&self.spec.path)?;
                    // Mirrored contents are text; invalid UTF-8 sequences
                    // become U+FFFD.
                    fetched = Some(String::from_utf8_lossy(&bytes).into_owned());
                }
            }
            TransferDirection::Upload => {
                if let Some(local) = &self.spec.local_path {
                    transfer.upload_from_path(Path::new(local), &self.spec.path)?;
                } else {
                    let declared = self.spec.contents.clone().unwrap_or_default();
                    transfer.upload_bytes(&self.spec.path, declared.as_bytes())?;
                }
            }
        }

        let info = transfer.stat(&self.spec.path)?.required(&self.spec.path)?;

        self.apply_info(&info);
        if fetched.is_some() {
            self.state.contents = fetched;
        }
        self.phase = ResourcePhase::Present;

        info!(
            "created file resource '{}' ({} bytes)",
            info.base_name, info.size
        );
        Ok(())
    }

    /// Drift-detecting read. A missing remote file is tolerated for
    /// upload-only resources and resets the resource to absent; any size
    /// difference from the mirrored or declared size does the same. A
    /// clean match refreshes size and modification time.
    pub fn read(&mut self) -> FileResult<ReadOutcome> {
        let mut transfer = self.connector.connect(&self.spec.connection)?;

        let info = match transfer.stat(&self.spec.path)? {
            StatOutcome::Found(info) => info,
            StatOutcome::Missing => {
                if self.spec.direction == TransferDirection::Upload {
                    warn!(
                        "remote file '{}' vanished; resetting resource",
                        self.spec.path
                    );
                    return Ok(self.reset_absent());
                }
                return Err(FileError::not_found(&self.spec.path));
            }
        };

        let expected = match &self.spec.local_path {
            Some(local) => match std::fs::metadata(local) {
                Ok(metadata) => metadata.len(),
                Err(err)
                    if err.kind() == std::io::ErrorKind::NotFound
                        && self.spec.direction == TransferDirection::Download =>
                {
                    warn!("local mirror '{}' is gone; resetting resource", local);
                    return Ok(self.reset_absent());
                }
                Err(err) => {
                    return Err(FileError::local_io(format!(
                        "cannot stat local file '{}': {}",
                        local, err
                    )))
                }
            },
            // For in-memory resources the baseline is whatever was last
            // applied: the fetched contents after a download create, the
            // declared contents otherwise.
            None => self
                .state
                .contents
                .as_deref()
                .or(self.spec.contents.as_deref())
                .unwrap_or_default()
                .len() as u64,
        };

        if expected != info.size {
            warn!(
                "size drift for '{}': expected {}, remote has {}",
                self.spec.path, expected, info.size
            );
            return Ok(self.reset_absent());
        }

        self.apply_info(&info);
        self.phase = ResourcePhase::Present;
        Ok(ReadOutcome::Present)
    }

    /// Apply the destroy policies and tombstone the resource. Targets that
    /// are already gone are tolerated, so repeated deletes never error.
    pub fn delete(&mut self) -> FileResult<()> {
        if self.spec.destroy_local_file {
            if let Some(local) = &self.spec.local_path {
                let path = Path::new(local);
                if path.exists() {
                    std::fs::remove_file(path).map_err(|e| {
                        FileError::local_io(format!("cannot remove local file '{}': {}", local, e))
                    })?;
                    info!("removed local file {}", local);
                }
            }
        }

        if self.spec.destroy_remote_file {
            let mut transfer = self.connector.connect(&self.spec.connection)?;
            if let StatOutcome::Found(_) = transfer.stat(&self.spec.path)? {
                transfer.remove(&self.spec.path)?;
            }
        }

        self.state = RemoteFileState::absent();
        self.phase = ResourcePhase::Tombstoned;
        Ok(())
    }

    fn reset_absent(&mut self) -> ReadOutcome {
        self.state.id = None;
        self.phase = ResourcePhase::Absent;
        ReadOutcome::Vanished
    }

    fn apply_info(&mut self, info: &RemoteFileInfo) {
        self.state.id = Some(info.base_name.clone());
        self.state.size = info.size as i64;
        self.state.last_modified = Some(info.modified.to_rfc3339());
    }
}
