//! ICMP echo prober backed by one shared Layer-4 channel.
//!
//! A single raw socket carries the whole sweep: the sender half is
//! shared behind a lock, and a background thread drains the receiver
//! half, waking whichever probe is waiting on the reply's source
//! address. Opening one handle per host would exhaust descriptors on
//! wide subnets; this keeps the count at exactly one.
//!
//! Requires **root privileges** (or `CAP_NET_RAW`) to open the channel.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use pnet::packet::Packet;
use pnet::packet::icmp::IcmpPacket;
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::transport::{
    self, TransportChannelType, TransportProtocol, TransportReceiver, TransportSender,
};
use thiserror::Error;
use tokio::sync::Notify;
use tracing::debug;

use sweepr_common::network::probe::ProbeResult;
use sweepr_protocols::icmp;

use super::Prober;

const TRANSPORT_BUFFER_SIZE: usize = 4096;
const CHANNEL_TYPE_ICMP: TransportChannelType =
    TransportChannelType::Layer4(TransportProtocol::Ipv4(IpNextHeaderProtocols::Icmp));

/// Raised when the shared ICMP channel cannot be opened, typically for
/// lack of privileges.
#[derive(Debug, Error)]
#[error("failed to open ICMP transport channel: {source}")]
pub struct ProbeSetupError {
    #[from]
    source: std::io::Error,
}

/// One waiter per in-flight target address.
///
/// Probes register before sending; the listener wakes and removes the
/// entry when a matching reply arrives. `Notify` keeps a permit, so a
/// reply that lands between send and await is not lost.
#[derive(Default)]
struct WaiterRegistry {
    waiters: Mutex<HashMap<Ipv4Addr, Arc<Notify>>>,
}

impl WaiterRegistry {
    fn register(&self, addr: Ipv4Addr) -> Arc<Notify> {
        let notifier = Arc::new(Notify::new());
        self.lock().insert(addr, Arc::clone(&notifier));
        notifier
    }

    fn notify(&self, addr: Ipv4Addr) {
        if let Some(notifier) = self.lock().remove(&addr) {
            notifier.notify_one();
        }
    }

    fn forget(&self, addr: Ipv4Addr) {
        self.lock().remove(&addr);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Ipv4Addr, Arc<Notify>>> {
        self.waiters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Sends one echo request per probe and waits for the matching reply.
pub struct IcmpProber {
    tx: tokio::sync::Mutex<TransportSender>,
    registry: Arc<WaiterRegistry>,
    identifier: u16,
    sequence: AtomicU16,
    probe_timeout: Duration,
}

impl IcmpProber {
    /// Opens the shared channel and starts the reply listener.
    pub fn new(probe_timeout: Duration) -> Result<Self, ProbeSetupError> {
        let (tx, rx) = transport::transport_channel(TRANSPORT_BUFFER_SIZE, CHANNEL_TYPE_ICMP)?;

        let registry: Arc<WaiterRegistry> = Arc::new(WaiterRegistry::default());
        let identifier: u16 = rand::random();
        spawn_reply_listener(rx, Arc::clone(&registry), identifier);

        Ok(Self {
            tx: tokio::sync::Mutex::new(tx),
            registry,
            identifier,
            sequence: AtomicU16::new(0),
            probe_timeout,
        })
    }
}

#[async_trait]
impl Prober for IcmpProber {
    async fn probe(&self, addr: Ipv4Addr) -> ProbeResult {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let request = match icmp::build_echo_request(self.identifier, sequence) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!("failed to build echo request for {addr}: {err}");
                return ProbeResult::unreachable(addr);
            }
        };

        // Register before sending so a fast reply cannot slip past.
        let notifier = self.registry.register(addr);
        let started: Instant = Instant::now();

        let Some(packet) = IcmpPacket::new(&request) else {
            self.registry.forget(addr);
            return ProbeResult::unreachable(addr);
        };

        let sent = {
            let mut tx = self.tx.lock().await;
            tx.send_to(packet, IpAddr::V4(addr))
        };

        if let Err(err) = sent {
            debug!("echo request to {addr} was not sent: {err}");
            self.registry.forget(addr);
            return ProbeResult::unreachable(addr);
        }

        match tokio::time::timeout(self.probe_timeout, notifier.notified()).await {
            Ok(()) => ProbeResult::reply(addr, started.elapsed()),
            Err(_elapsed) => {
                self.registry.forget(addr);
                ProbeResult::unreachable(addr)
            }
        }
    }
}

/// Drains the receiver half on a dedicated thread, waking the probe
/// that owns each reply. Frames from other ICMP sessions are filtered
/// out by the identifier tag.
fn spawn_reply_listener(mut rx: TransportReceiver, registry: Arc<WaiterRegistry>, identifier: u16) {
    std::thread::spawn(move || {
        let mut iterator = transport::icmp_packet_iter(&mut rx);
        loop {
            match iterator.next() {
                Ok((packet, IpAddr::V4(source))) => {
                    if let Some(reply) = icmp::parse_echo_reply(packet.packet()) {
                        if reply.identifier == identifier {
                            registry.notify(source);
                        }
                    }
                }
                Ok((_, IpAddr::V6(_))) => {}
                Err(err) => {
                    debug!("icmp listener read error: {err}");
                }
            }
        }
    });
}
