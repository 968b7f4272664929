//! Fan-out/fan-in probe dispatch.
//!
//! One probe future per address, at most `concurrency` in flight, one
//! join point at the end. Results come back in input order no matter
//! which hosts answer first, so slot `i` always belongs to `addrs[i]`.

use std::net::Ipv4Addr;

use futures::stream::{self, StreamExt};

use sweepr_common::network::probe::ProbeResult;

use crate::prober::Prober;

/// Probes every address concurrently and collects all outcomes.
///
/// Returns only once every probe has resolved; a probe that fails or
/// times out occupies its slot as unreachable without affecting any
/// sibling. `concurrency` bounds the number of live probes so wide
/// subnets do not launch tens of thousands of echo requests at once.
pub async fn probe_all<P>(prober: &P, addrs: &[Ipv4Addr], concurrency: usize) -> Vec<ProbeResult>
where
    P: Prober + ?Sized,
{
    stream::iter(addrs.iter().copied())
        .map(|addr| prober.probe(addr))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
