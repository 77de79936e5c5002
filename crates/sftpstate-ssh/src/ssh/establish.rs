// ── Connection establishment – bounded tick-gated dial retry ─────────────────

use crate::ssh::types::{AuthMaterial, ConnectionConfig, HostIdentityPolicy};
use log::{info, warn};
use sftpstate_core::{FileError, FileResult};
use std::time::{Duration, Instant};

/// Seconds between permitted dial attempts.
pub const DIAL_TICK_SECS: u64 = 10;
/// Sleep used to advance the clock between ticks.
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);
/// Extra pause after a failed dial attempt.
pub const FAILURE_PAUSE: Duration = Duration::from_secs(1);

/// Injectable time source so the retry loop is testable without
/// wall-clock delays.
pub trait Clock {
    /// Monotonic reading since an arbitrary epoch.
    fn now(&self) -> Duration;
    fn sleep(&self, duration: Duration);
}

/// Wall-clock implementation backed by `Instant` and real blocking sleeps.
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// One dial attempt: TCP connect, handshake, host-key check, auth.
pub trait SessionDialer {
    type Session;

    fn dial(
        &self,
        config: &ConnectionConfig,
        auth: &AuthMaterial,
        policy: &HostIdentityPolicy,
    ) -> FileResult<Self::Session>;
}

/// Builds authenticated sessions within a bounded-time retry budget.
///
/// Dial attempts are gated on whole elapsed seconds being a multiple of
/// [`DIAL_TICK_SECS`]; between ticks the loop only advances the clock in
/// [`POLL_INTERVAL`] steps, absorbing transient failures (e.g. a freshly
/// booted host whose sshd is still starting) without hammering it.
///
/// The gating is on elapsed time, not an attempt counter: a dial that
/// itself blocks past the next tick boundary skips ticks, and a budget
/// under one tick yields one attempt or none depending on timing jitter.
/// This mirrors the behavior the configuration surface has always had.
pub struct Establisher<D, C = SystemClock> {
    dialer: D,
    clock: C,
}

impl<D: SessionDialer> Establisher<D> {
    pub fn new(dialer: D) -> Self {
        Self {
            dialer,
            clock: SystemClock::new(),
        }
    }
}

impl<D: SessionDialer, C: Clock> Establisher<D, C> {
    pub fn with_clock(dialer: D, clock: C) -> Self {
        Self { dialer, clock }
    }

    /// Establish an authenticated session, retrying failed dials until the
    /// configured budget is exhausted. Credential and host-key validation
    /// happen first; validation failures never touch the network. The last
    /// dial error is surfaced when the budget runs out.
    pub fn establish(&self, config: &ConnectionConfig) -> FileResult<D::Session> {
        let auth = AuthMaterial::from_config(config)?;
        let policy = HostIdentityPolicy::from_config(config)?;
        let budget = config.timeout()?;

        let started = self.clock.now();
        let mut last_error: Option<FileError> = None;

        loop {
            let elapsed = self.clock.now().saturating_sub(started);
            if elapsed >= budget {
                break;
            }

            if elapsed.as_secs() % DIAL_TICK_SECS == 0 {
                match self.dialer.dial(config, &auth, &policy) {
                    Ok(session) => {
                        info!(
                            "connected to {} after {:.1}s",
                            config.addr(),
                            elapsed.as_secs_f64()
                        );
                        return Ok(session);
                    }
                    Err(err) => {
                        warn!("dial attempt for {} failed: {}", config.addr(), err);
                        last_error = Some(err);
                        self.clock.sleep(FAILURE_PAUSE);
                    }
                }
            }

            self.clock.sleep(POLL_INTERVAL);
        }

        Err(last_error.unwrap_or_else(|| {
            FileError::connection_failed(format!(
                "connection to {} timed out before the first dial attempt",
                config.addr()
            ))
        }))
    }
}
