//! # sftpstate – core
//!
//! Shared pieces used by every sftpstate crate:
//!   • Categorised `FileError` covering the five failure classes of a
//!     remote-file reconciliation (configuration, connection, stat,
//!     transfer, local I/O)
//!   • The `FileResult<T>` alias

pub mod error;

pub use error::{FileError, FileErrorKind, FileResult};
