// ── sftpstate-sftp / sftp module ──────────────────────────────────────────────
//
// File-transfer session over an authenticated transport:
//   • RemoteFileInfo / StatOutcome — remote metadata with the designed
//     Found | Missing distinction
//   • SftpTransfer — the real ssh2-backed session, one per operation
//   • FileTransfer / Connect — the seams the reconciler depends on

pub mod types;
pub mod transfer;

pub use transfer::{Connect, FileTransfer, SftpTransfer, SshConnect};
pub use types::*;
