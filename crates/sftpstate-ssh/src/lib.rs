//! # sftpstate – ssh
//!
//! Connection establishment for remote-file reconciliation:
//!   • Typed endpoint / credential / host-identity configuration
//!   • Fail-fast credential and pinned-host-key validation
//!   • Bounded dial retry gated on 10-second ticks, behind injectable
//!     clock and dialer seams
//!   • Session handles with deterministic reverse-order teardown

pub mod ssh;
