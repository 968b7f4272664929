#![cfg(test)]
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use sweepr_common::network::probe::ProbeResult;
use sweepr_common::network::spec::NetworkSpec;
use sweepr_core::dispatcher;
use sweepr_core::prober::Prober;

/// Simulated transport: hosts listed in `latencies` answer after their
/// scripted delay, everyone else waits out the probe timeout.
struct SimulatedTransport {
    latencies: HashMap<Ipv4Addr, Duration>,
    probe_timeout: Duration,
}

#[async_trait]
impl Prober for SimulatedTransport {
    async fn probe(&self, addr: Ipv4Addr) -> ProbeResult {
        match self.latencies.get(&addr) {
            Some(latency) => {
                tokio::time::sleep(*latency).await;
                ProbeResult::reply(addr, *latency)
            }
            None => {
                tokio::time::sleep(self.probe_timeout).await;
                ProbeResult::unreachable(addr)
            }
        }
    }
}

/// The canonical end-to-end case: a /30 has exactly two usable hosts,
/// `.1` answers in 5 ms, `.2` never does. The sweep must report both,
/// in enumeration order, with only `.1` reachable.
#[tokio::test(start_paused = true)]
async fn sweep_slash_30_reports_one_active_host() {
    let network: NetworkSpec = "10.0.0.0/30".parse().unwrap();
    let addrs: Vec<Ipv4Addr> = network.hosts().collect();
    assert_eq!(
        addrs,
        vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2)]
    );

    let transport = SimulatedTransport {
        latencies: HashMap::from([(Ipv4Addr::new(10, 0, 0, 1), Duration::from_millis(5))]),
        probe_timeout: Duration::from_millis(1000),
    };

    let results = dispatcher::probe_all(&transport, &addrs, 16).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].addr, Ipv4Addr::new(10, 0, 0, 1));
    assert_eq!(results[0].rtt, Some(Duration::from_millis(5)));
    assert_eq!(results[1].addr, Ipv4Addr::new(10, 0, 0, 2));
    assert!(!results[1].is_reachable());

    let active: Vec<&ProbeResult> = results.iter().filter(|r| r.is_reachable()).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].addr, Ipv4Addr::new(10, 0, 0, 1));
}

#[tokio::test]
async fn sweep_of_point_to_point_network_probes_nothing() {
    let network: NetworkSpec = "192.168.0.0/31".parse().unwrap();
    let addrs: Vec<Ipv4Addr> = network.hosts().collect();
    assert!(addrs.is_empty());

    let transport = SimulatedTransport {
        latencies: HashMap::new(),
        probe_timeout: Duration::from_millis(10),
    };

    let results = dispatcher::probe_all(&transport, &addrs, 16).await;
    assert!(results.is_empty());
}

/// A wide sweep through a narrow concurrency bound must still produce
/// every result in enumeration order.
#[tokio::test(start_paused = true)]
async fn bounded_sweep_preserves_enumeration_order() {
    let network: NetworkSpec = "10.0.0.0/28".parse().unwrap();
    let addrs: Vec<Ipv4Addr> = network.hosts().collect();
    assert_eq!(addrs.len(), 14);

    // Every other host answers, with latency descending so completion
    // order fights enumeration order.
    let latencies: HashMap<Ipv4Addr, Duration> = addrs
        .iter()
        .step_by(2)
        .enumerate()
        .map(|(i, addr)| (*addr, Duration::from_millis(70 - 10 * i as u64)))
        .collect();

    let transport = SimulatedTransport {
        latencies,
        probe_timeout: Duration::from_millis(100),
    };

    let results = dispatcher::probe_all(&transport, &addrs, 4).await;

    let result_addrs: Vec<Ipv4Addr> = results.iter().map(|r| r.addr).collect();
    assert_eq!(result_addrs, addrs);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.is_reachable(), i % 2 == 0, "host index {i}");
    }
}
