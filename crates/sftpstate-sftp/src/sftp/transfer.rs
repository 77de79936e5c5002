// ── SftpTransfer – stat, handles and whole-file copies ───────────────────────

use crate::sftp::types::{RemoteFileInfo, StatOutcome};
use chrono::{TimeZone, Utc};
use log::info;
use sftpstate_core::{FileError, FileResult};
use sftpstate_ssh::ssh::{ConnectionConfig, Establisher, Ssh2Dialer, SshSession};
use std::fs::OpenOptions;
use std::io::{self, Read, Write};
use std::path::Path;

/// SFTP status code for a path that does not exist.
const LIBSSH2_FX_NO_SUCH_FILE: i32 = 2;

/// Operations a reconciler needs from one file-transfer session.
pub trait FileTransfer {
    fn stat(&mut self, path: &str) -> FileResult<StatOutcome>;
    fn read_to_bytes(&mut self, path: &str) -> FileResult<Vec<u8>>;
    fn download_to_path(&mut self, remote: &str, local: &Path) -> FileResult<u64>;
    fn upload_from_path(&mut self, local: &Path, remote: &str) -> FileResult<u64>;
    fn upload_bytes(&mut self, remote: &str, contents: &[u8]) -> FileResult<u64>;
    fn remove(&mut self, path: &str) -> FileResult<()>;
}

/// Connection factory handing out one transfer session per logical
/// operation. Sessions are never pooled or reused.
pub trait Connect {
    type Transfer: FileTransfer;

    fn connect(&self, config: &ConnectionConfig) -> FileResult<Self::Transfer>;
}

// ── Real session ─────────────────────────────────────────────────────────────

/// SFTP transfer session over an authenticated SSH transport.
///
/// Field order drops the SFTP channel before the transport; per-file
/// handles live inside the individual operations and are dropped before
/// either.
pub struct SftpTransfer {
    sftp: ssh2::Sftp,
    #[allow(dead_code)] // owns the transport for the life of the channel
    session: SshSession,
}

impl SftpTransfer {
    pub fn new(session: SshSession) -> FileResult<Self> {
        let sftp = session.sftp_channel()?;
        Ok(Self { sftp, session })
    }

    /// Open a remote file for reading.
    pub fn open_for_read(&self, path: &str) -> FileResult<ssh2::File> {
        self.sftp.open(Path::new(path)).map_err(|e| {
            FileError::transfer_failed(format!("cannot open remote file '{}': {}", path, e))
                .with_path(path)
        })
    }

    /// Create (or truncate) a remote file for writing.
    pub fn create_for_write(&self, path: &str) -> FileResult<ssh2::File> {
        self.sftp.create(Path::new(path)).map_err(|e| {
            FileError::transfer_failed(format!("cannot create remote file '{}': {}", path, e))
                .with_path(path)
        })
    }

    // Local mirror files are opened read-write and never created: the
    // mirror must already exist on disk.
    fn open_local(path: &Path) -> FileResult<std::fs::File> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| {
                FileError::local_io(format!("cannot open local file '{}': {}", path.display(), e))
            })
    }
}

impl FileTransfer for SftpTransfer {
    fn stat(&mut self, path: &str) -> FileResult<StatOutcome> {
        match self.sftp.lstat(Path::new(path)) {
            Ok(stat) => Ok(StatOutcome::Found(info_from_stat(path, &stat))),
            Err(err) if is_no_such_file(&err) => Ok(StatOutcome::Missing),
            Err(err) => Err(FileError::stat_failed(format!(
                "stat failed for '{}': {}",
                path, err
            ))
            .with_path(path)),
        }
    }

    fn read_to_bytes(&mut self, path: &str) -> FileResult<Vec<u8>> {
        let mut remote = self.open_for_read(path)?;
        let mut buffer = Vec::new();
        remote.read_to_end(&mut buffer).map_err(|e| {
            FileError::transfer_failed(format!("read from '{}' failed: {}", path, e))
                .with_path(path)
        })?;
        Ok(buffer)
    }

    fn download_to_path(&mut self, remote_path: &str, local: &Path) -> FileResult<u64> {
        let mut remote = self.open_for_read(remote_path)?;
        let mut local_file = Self::open_local(local)?;
        let copied = io::copy(&mut remote, &mut local_file).map_err(|e| {
            FileError::transfer_failed(format!("download of '{}' failed: {}", remote_path, e))
                .with_path(remote_path)
        })?;
        info!("downloaded {} bytes from {}", copied, remote_path);
        Ok(copied)
    }

    fn upload_from_path(&mut self, local: &Path, remote_path: &str) -> FileResult<u64> {
        let mut local_file = Self::open_local(local)?;
        let mut remote = self.create_for_write(remote_path)?;
        let copied = io::copy(&mut local_file, &mut remote).map_err(|e| {
            FileError::transfer_failed(format!("upload to '{}' failed: {}", remote_path, e))
                .with_path(remote_path)
        })?;
        info!("uploaded {} bytes to {}", copied, remote_path);
        Ok(copied)
    }

    fn upload_bytes(&mut self, remote_path: &str, contents: &[u8]) -> FileResult<u64> {
        let mut remote = self.create_for_write(remote_path)?;
        remote.write_all(contents).map_err(|e| {
            FileError::transfer_failed(format!("upload to '{}' failed: {}", remote_path, e))
                .with_path(remote_path)
        })?;
        info!("uploaded {} bytes to {}", contents.len(), remote_path);
        Ok(contents.len() as u64)
    }

    fn remove(&mut self, path: &str) -> FileResult<()> {
        self.sftp.unlink(Path::new(path)).map_err(|e| {
            FileError::transfer_failed(format!("cannot remove remote file '{}': {}", path, e))
                .with_path(path)
        })?;
        info!("removed remote file {}", path);
        Ok(())
    }
}

fn is_no_such_file(err: &ssh2::Error) -> bool {
    matches!(err.code(), ssh2::ErrorCode::SFTP(LIBSSH2_FX_NO_SUCH_FILE))
}

/// Convert an ssh2 `FileStat` + path into our `RemoteFileInfo`.
fn info_from_stat(path: &str, stat: &ssh2::FileStat) -> RemoteFileInfo {
    let base_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string());

    let modified = Utc
        .timestamp_opt(stat.mtime.unwrap_or(0) as i64, 0)
        .single()
        .unwrap_or_else(Utc::now);

    RemoteFileInfo {
        base_name,
        size: stat.size.unwrap_or(0),
        modified,
    }
}

// ── Real connector ───────────────────────────────────────────────────────────

/// Tick-gated establishment followed by an SFTP channel.
pub struct SshConnect {
    establisher: Establisher<Ssh2Dialer>,
}

impl SshConnect {
    pub fn new() -> Self {
        Self {
            establisher: Establisher::new(Ssh2Dialer),
        }
    }
}

impl Default for SshConnect {
    fn default() -> Self {
        Self::new()
    }
}

impl Connect for SshConnect {
    type Transfer = SftpTransfer;

    fn connect(&self, config: &ConnectionConfig) -> FileResult<SftpTransfer> {
        let session = self.establisher.establish(config)?;
        SftpTransfer::new(session)
    }
}
