//! # Probe Outcome Model
//!
//! The per-host result record shared between the probe engine and the
//! presentation layer.

use std::net::Ipv4Addr;
use std::time::Duration;

/// Outcome of a single liveness probe.
///
/// `rtt` is `Some` exactly when the host answered within the probe
/// timeout; a timeout or any network-level failure collapses to
/// `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    pub addr: Ipv4Addr,
    pub rtt: Option<Duration>,
}

impl ProbeResult {
    pub fn reply(addr: Ipv4Addr, rtt: Duration) -> Self {
        Self {
            addr,
            rtt: Some(rtt),
        }
    }

    pub fn unreachable(addr: Ipv4Addr) -> Self {
        Self { addr, rtt: None }
    }

    pub fn is_reachable(&self) -> bool {
        self.rtt.is_some()
    }
}
