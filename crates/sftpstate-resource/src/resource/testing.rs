// ── In-memory remote host used by the reconciler tests ───────────────────────

use chrono::{TimeZone, Utc};
use sftpstate_core::{FileError, FileResult};
use sftpstate_sftp::sftp::{Connect, FileTransfer, RemoteFileInfo, StatOutcome};
use sftpstate_ssh::ssh::ConnectionConfig;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use crate::resource::types::RemoteFileSpec;

/// Remote filesystem shared by every transfer session a test opens.
pub struct FakeHost {
    files: Rc<RefCell<HashMap<String, Vec<u8>>>>,
    connects: Rc<Cell<usize>>,
    fail_uploads: Rc<Cell<bool>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            files: Rc::new(RefCell::new(HashMap::new())),
            connects: Rc::new(Cell::new(0)),
            fail_uploads: Rc::new(Cell::new(false)),
        }
    }

    pub fn connector(&self) -> FakeConnect {
        FakeConnect {
            files: Rc::clone(&self.files),
            connects: Rc::clone(&self.connects),
            fail_uploads: Rc::clone(&self.fail_uploads),
        }
    }

    pub fn put(&self, path: &str, contents: &[u8]) {
        self.files
            .borrow_mut()
            .insert(path.to_string(), contents.to_vec());
    }

    pub fn delete(&self, path: &str) {
        self.files.borrow_mut().remove(path);
    }

    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    pub fn connects(&self) -> usize {
        self.connects.get()
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.set(fail);
    }
}

pub struct FakeConnect {
    files: Rc<RefCell<HashMap<String, Vec<u8>>>>,
    connects: Rc<Cell<usize>>,
    fail_uploads: Rc<Cell<bool>>,
}

impl Connect for FakeConnect {
    type Transfer = FakeTransfer;

    fn connect(&self, _config: &ConnectionConfig) -> FileResult<FakeTransfer> {
        self.connects.set(self.connects.get() + 1);
        Ok(FakeTransfer {
            files: Rc::clone(&self.files),
            fail_uploads: Rc::clone(&self.fail_uploads),
        })
    }
}

pub struct FakeTransfer {
    files: Rc<RefCell<HashMap<String, Vec<u8>>>>,
    fail_uploads: Rc<Cell<bool>>,
}

impl FileTransfer for FakeTransfer {
    fn stat(&mut self, path: &str) -> FileResult<StatOutcome> {
        match self.files.borrow().get(path) {
            Some(contents) => Ok(StatOutcome::Found(RemoteFileInfo {
                base_name: Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.to_string()),
                size: contents.len() as u64,
                // A fixed timestamp keeps state assertions deterministic.
                modified: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            })),
            None => Ok(StatOutcome::Missing),
        }
    }

    fn read_to_bytes(&mut self, path: &str) -> FileResult<Vec<u8>> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| FileError::not_found(path))
    }

    fn download_to_path(&mut self, remote: &str, local: &Path) -> FileResult<u64> {
        let bytes = self.read_to_bytes(remote)?;
        std::fs::write(local, &bytes)
            .map_err(|e| FileError::local_io(format!("write to {}: {}", local.display(), e)))?;
        Ok(bytes.len() as u64)
    }

    fn upload_from_path(&mut self, local: &Path, remote: &str) -> FileResult<u64> {
        let bytes = std::fs::read(local)
            .map_err(|e| FileError::local_io(format!("read from {}: {}", local.display(), e)))?;
        self.upload_bytes(remote, &bytes)
    }

    fn upload_bytes(&mut self, remote: &str, contents: &[u8]) -> FileResult<u64> {
        if self.fail_uploads.get() {
            return Err(
                FileError::transfer_failed(format!("upload to '{}' failed: rejected", remote))
                    .with_path(remote),
            );
        }
        self.files
            .borrow_mut()
            .insert(remote.to_string(), contents.to_vec());
        Ok(contents.len() as u64)
    }

    fn remove(&mut self, path: &str) -> FileResult<()> {
        match self.files.borrow_mut().remove(path) {
            Some(_) => Ok(()),
            None => Err(
                FileError::transfer_failed(format!("cannot remove '{}': no such file", path))
                    .with_path(path),
            ),
        }
    }
}

/// Download spec for an in-memory resource against the fake host.
pub fn spec(path: &str) -> RemoteFileSpec {
    RemoteFileSpec {
        connection: connection(),
        path: path.to_string(),
        ..Default::default()
    }
}

pub fn connection() -> ConnectionConfig {
    ConnectionConfig {
        host: "203.0.113.5".to_string(),
        user: "deploy".to_string(),
        password: "secret".to_string(),
        timeout: "5m".to_string(),
        ..Default::default()
    }
}
