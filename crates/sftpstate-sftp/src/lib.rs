//! # sftpstate – sftp
//!
//! File-transfer session over an established SSH connection:
//!   • stat / open-for-read / create-for-write / remove, with the SFTP
//!     no-such-file status surfaced as a distinguishable outcome
//!   • Whole-file copies between remote handles and local files or
//!     in-memory buffers
//!   • The `FileTransfer` and `Connect` seams the reconciler is built on

pub mod sftp;
