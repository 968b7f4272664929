//! The **abstraction** for single-host liveness checks.
//!
//! The dispatcher depends only on this trait; the concrete [`IcmpProber`]
//! owns the raw socket plumbing. Tests substitute a scripted
//! implementation, so everything above this seam runs without privileges
//! or a network.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use sweepr_common::network::probe::ProbeResult;

mod icmp;

pub use icmp::{IcmpProber, ProbeSetupError};

/// A single-host liveness check.
///
/// Implementations are infallible per probe: a timeout or any
/// socket-level failure is encoded as an unreachable [`ProbeResult`],
/// never as an error that could abort a batch.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, addr: Ipv4Addr) -> ProbeResult;
}
