// ── sftpstate-resource / resource module ──────────────────────────────────────
//
// Reconciliation of one mirrored remote file:
//   • RemoteFileSpec / RemoteFileQuery / RemoteFileState — declared vs
//     observed state, with the "missing" identity sentinel
//   • FileResource — create / drift-detecting read / tolerant delete
//   • RemoteFileDataSource — read-only projection with allow-missing

pub mod types;
pub mod file;
pub mod data_source;

#[cfg(test)]
pub(crate) mod testing;

pub use data_source::RemoteFileDataSource;
pub use file::FileResource;
pub use types::*;
