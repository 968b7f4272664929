//! # Network Specification Model
//!
//! Parses CIDR notation (e.g. `192.168.1.0/24`) into a validated
//! [`NetworkSpec`] and enumerates the usable host addresses it contains.
//!
//! Enumeration varies the full host portion of the address, so wide
//! networks (`/16`, `/20`, ...) cross octet boundaries correctly instead
//! of wrapping inside the last octet.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use thiserror::Error;

/// Reasons a CIDR string is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseNetworkError {
    #[error("invalid network format, use CIDR notation, e.g. 192.168.1.0/24")]
    MissingPrefix,
    #[error("invalid network address '{0}': expected four octets in 0-255")]
    InvalidAddress(String),
    #[error("invalid prefix length '{0}': expected an integer")]
    InvalidPrefix(String),
    #[error("prefix length /{0} is out of range, must be 0-32")]
    PrefixOutOfRange(u8),
}

/// A validated IPv4 network in CIDR notation.
///
/// Constructed once from user input and immutable afterwards. The base
/// address is kept as given; [`NetworkSpec::network`] and
/// [`NetworkSpec::broadcast`] derive the subnet bounds from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkSpec {
    base: Ipv4Addr,
    prefix: u8,
}

impl NetworkSpec {
    pub fn new(base: Ipv4Addr, prefix: u8) -> Result<Self, ParseNetworkError> {
        if prefix > 32 {
            return Err(ParseNetworkError::PrefixOutOfRange(prefix));
        }
        Ok(Self { base, prefix })
    }

    pub fn base(&self) -> Ipv4Addr {
        self.base
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    fn mask(&self) -> u32 {
        match self.prefix {
            0 => 0,
            p => u32::MAX << (32 - p),
        }
    }

    /// The all-zero-host address of the containing subnet.
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.base) & self.mask())
    }

    /// The all-one-host address of the containing subnet.
    pub fn broadcast(&self) -> Ipv4Addr {
        let mask = self.mask();
        Ipv4Addr::from(u32::from(self.base) & mask | !mask)
    }

    /// Usable host addresses in ascending order.
    ///
    /// Excludes the network and broadcast addresses, so `/31` and `/32`
    /// networks enumerate nothing. Each call restarts the enumeration.
    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> {
        let (first, last) = self.host_bounds();
        (first..=last).map(Ipv4Addr::from)
    }

    /// Number of usable host addresses; `2^(32-prefix) - 2` for
    /// prefixes up to `/30`, zero for `/31` and `/32`.
    pub fn host_count(&self) -> usize {
        let (first, last) = self.host_bounds();
        if first > last {
            0
        } else {
            (last - first) as usize + 1
        }
    }

    fn host_bounds(&self) -> (u32, u32) {
        let network = u32::from(self.network());
        let broadcast = u32::from(self.broadcast());
        (network.saturating_add(1), broadcast.saturating_sub(1))
    }
}

impl FromStr for NetworkSpec {
    type Err = ParseNetworkError;

    /// Parses `address/prefix`. The address must be four dot-separated
    /// octets in 0-255, the prefix an integer in 0-32; anything else is
    /// rejected without partial results.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((addr_str, prefix_str)) = s.split_once('/') else {
            return Err(ParseNetworkError::MissingPrefix);
        };

        let base = addr_str
            .parse::<Ipv4Addr>()
            .map_err(|_| ParseNetworkError::InvalidAddress(addr_str.to_string()))?;

        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|_| ParseNetworkError::InvalidPrefix(prefix_str.to_string()))?;

        Self::new(base, prefix)
    }
}

impl fmt::Display for NetworkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix)
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
