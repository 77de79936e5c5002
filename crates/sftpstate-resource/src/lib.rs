//! # sftpstate – resource
//!
//! Reconciliation of one mirrored remote file against its declared spec:
//!   • `FileResource` — create, drift-detecting read (any size mismatch
//!     resets the resource for recreation), tolerant delete
//!   • `RemoteFileDataSource` — read-only projection recomputing
//!     contents / size / modification time on every invocation, with the
//!     allow-missing sentinel state

pub mod resource;
