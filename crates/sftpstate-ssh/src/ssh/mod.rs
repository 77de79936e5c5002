// ── sftpstate-ssh / ssh module ────────────────────────────────────────────────
//
// Connection establishment:
//   • ConnectionConfig — serde-facing endpoint + credential description
//   • AuthMaterial / HostIdentityPolicy — validated before any dial
//   • Establisher — bounded retry loop (10s dial ticks, 200ms polls)
//   • SshSession — owned TCP stream + authenticated ssh2 session

pub mod types;
pub mod establish;
pub mod session;

pub use establish::{Clock, Establisher, SessionDialer, SystemClock};
pub use session::{Ssh2Dialer, SshSession};
pub use types::*;
