// ── SshSession – dialing, host-key verification, authentication ──────────────

use crate::ssh::establish::SessionDialer;
use crate::ssh::types::{AuthMaterial, ConnectionConfig, HostIdentityPolicy};
use log::info;
use sftpstate_core::{FileError, FileResult};
use ssh2::Session;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// TCP connect timeout for a single dial attempt; the overall retry
/// budget lives in the establisher.
const TCP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// One authenticated SSH transport, exclusively owned by the operation
/// that created it and never reused across operations.
///
/// Field order tears the session down before the TCP stream.
pub struct SshSession {
    session: Session,
    #[allow(dead_code)] // held to keep the TCP connection alive
    tcp: TcpStream,
}

impl SshSession {
    /// Open an SFTP channel on this transport.
    pub fn sftp_channel(&self) -> FileResult<ssh2::Sftp> {
        self.session
            .sftp()
            .map_err(|e| FileError::connection_failed(format!("cannot open SFTP channel: {}", e)))
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        let _ = self.session.disconnect(None, "closing session", None);
    }
}

// ── Real dialer ──────────────────────────────────────────────────────────────

/// Dials with ssh2: TCP connect, SSH handshake, host-key verification
/// against the pinned-key policy, then authentication.
pub struct Ssh2Dialer;

impl SessionDialer for Ssh2Dialer {
    type Session = SshSession;

    fn dial(
        &self,
        config: &ConnectionConfig,
        auth: &AuthMaterial,
        policy: &HostIdentityPolicy,
    ) -> FileResult<SshSession> {
        let addr = config.addr();

        let sock_addr = addr
            .to_socket_addrs()
            .map_err(|e| FileError::connection_failed(format!("cannot resolve '{}': {}", addr, e)))?
            .next()
            .ok_or_else(|| {
                FileError::connection_failed(format!("'{}' resolved to no addresses", addr))
            })?;

        let tcp = TcpStream::connect_timeout(&sock_addr, TCP_CONNECT_TIMEOUT)
            .map_err(|e| FileError::connection_failed(format!("TCP connection to {} failed: {}", addr, e)))?;
        tcp.set_nonblocking(false)
            .map_err(|e| FileError::connection_failed(format!("cannot set blocking mode: {}", e)))?;

        let mut session = Session::new()
            .map_err(|e| FileError::connection_failed(format!("cannot create SSH session: {}", e)))?;

        if config.compress {
            session.set_compress(true);
        }

        session.set_tcp_stream(
            tcp.try_clone()
                .map_err(|e| FileError::connection_failed(e.to_string()))?,
        );
        session
            .handshake()
            .map_err(|e| FileError::connection_failed(format!("SSH handshake with {} failed: {}", addr, e)))?;

        match session.host_key() {
            Some((blob, _key_type)) => policy.verify(&config.host, blob)?,
            None => {
                return Err(FileError::connection_failed(format!(
                    "{} presented no host key",
                    addr
                )))
            }
        }

        authenticate(&mut session, config, auth)?;

        if !session.authenticated() {
            return Err(FileError::connection_failed(format!(
                "not authenticated to {} after auth attempt",
                addr
            )));
        }

        info!("authenticated to {} as '{}'", addr, config.user);

        Ok(SshSession { session, tcp })
    }
}

fn authenticate(
    session: &mut Session,
    config: &ConnectionConfig,
    auth: &AuthMaterial,
) -> FileResult<()> {
    match auth {
        AuthMaterial::Password(password) => session
            .userauth_password(&config.user, password)
            .map_err(|e| {
                FileError::connection_failed(format!("password authentication failed: {}", e))
            }),
        AuthMaterial::PrivateKey { pem } => {
            // libssh2 reads key material from disk; stage the PEM in a
            // uuid-named temp file for the duration of the call.
            let tmp_key =
                std::env::temp_dir().join(format!("sftpstate_key_{}", uuid::Uuid::new_v4()));
            std::fs::write(&tmp_key, pem.as_bytes()).map_err(|e| {
                FileError::local_io(format!("cannot stage private key file: {}", e))
            })?;
            let result = session.userauth_pubkey_file(&config.user, None, &tmp_key, None);
            let _ = std::fs::remove_file(&tmp_key);
            result.map_err(|e| {
                FileError::connection_failed(format!("public-key authentication failed: {}", e))
            })
        }
    }
}
