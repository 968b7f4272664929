pub mod sweep;

use clap::Parser;
use sweepr_common::config::{DEFAULT_CONCURRENCY, DEFAULT_PROBE_TIMEOUT_MS};
use sweepr_common::network::spec::NetworkSpec;

#[derive(Parser, Debug)]
#[command(name = "sweepr")]
#[command(about = "Concurrent ICMP liveness scanner for IPv4 subnets.")]
pub struct CommandLine {
    /// Network to sweep, in CIDR notation (e.g. 192.168.1.0/24)
    #[arg(short = 'a', long = "address", value_name = "NETWORK")]
    pub network: NetworkSpec,

    /// Per-probe reply timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT_MS, value_name = "MILLIS")]
    pub timeout_ms: u64,

    /// Maximum number of probes in flight at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY, value_name = "N")]
    pub concurrency: usize,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
