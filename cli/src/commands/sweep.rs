use std::net::Ipv4Addr;
use std::time::Instant;

use anyhow::Context;
use tracing::{info, warn};

use sweepr_common::config::Config;
use sweepr_common::network::probe::ProbeResult;
use sweepr_common::network::spec::NetworkSpec;
use sweepr_core::dispatcher;
use sweepr_core::prober::IcmpProber;

use crate::terminal::{print, spinner};

pub async fn sweep(network: NetworkSpec, cfg: &Config) -> anyhow::Result<()> {
    let addrs: Vec<Ipv4Addr> = network.hosts().collect();
    if addrs.is_empty() {
        print::no_usable_hosts(&network);
        return Ok(());
    }
    info!("Sweeping {network}: {} host addresses", addrs.len());

    if !is_root::is_root() {
        warn!("not running as root; opening the ICMP socket may fail");
    }
    let prober = IcmpProber::new(cfg.probe_timeout)
        .context("opening the ICMP socket (root or CAP_NET_RAW required)")?;

    let pb = spinner::start_sweep_spinner(addrs.len());
    let started: Instant = Instant::now();
    let results: Vec<ProbeResult> = dispatcher::probe_all(&prober, &addrs, cfg.concurrency).await;
    pb.finish_and_clear();

    print::results_table(&results);
    print::summary(&results, started.elapsed());
    Ok(())
}
