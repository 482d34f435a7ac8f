//! CIDR notation utilities.
//!
//! Provides [`Cidr`] for representing a network as address plus prefix
//! length, valid for both IPv4 (32-bit) and IPv6 (128-bit) addresses.

use crate::error::PoolError;
use serde::Serialize;
use std::net::IpAddr;
use std::str::FromStr;

/// A network in CIDR notation: an address and a prefix length.
///
/// The prefix length counts leading one-bits of the mask; the address width
/// (32 or 128 bits) follows the address family.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub struct Cidr {
    /// The network address.
    pub addr: IpAddr,
    /// The prefix length (0-32 for IPv4, 0-128 for IPv6).
    pub prefix: u8,
}

impl Cidr {
    /// Create a new [`Cidr`] from a string like `"172.18.0.0/16"` or
    /// `"fc00::/64"`.
    ///
    /// The address is normalized to the network: host bits beyond the
    /// prefix are zeroed, so `"172.18.0.1/16"` parses as `172.18.0.0/16`.
    pub fn new(cidr: &str) -> Result<Cidr, PoolError> {
        let invalid = |reason: &str| PoolError::InvalidCidr {
            input: cidr.to_string(),
            reason: reason.to_string(),
        };

        let cidr = cidr.trim();
        let (addr_part, prefix_part) = cidr
            .split_once('/')
            .ok_or_else(|| invalid("expected address/prefix"))?;

        let addr: IpAddr = addr_part
            .parse()
            .map_err(|_| invalid("not an IPv4 or IPv6 address"))?;
        let prefix: u8 = prefix_part
            .parse()
            .map_err(|_| invalid("prefix is not a number"))?;

        if prefix > bits_of(&addr) {
            return Err(invalid("prefix longer than address width"));
        }

        Ok(Cidr {
            addr: normalize(addr, prefix),
            prefix,
        })
    }

    /// Address width in bits: 32 for IPv4, 128 for IPv6.
    pub fn bits(&self) -> u8 {
        bits_of(&self.addr)
    }
}

fn bits_of(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

/// Zero the address bits beyond `prefix`.
fn normalize(addr: IpAddr, prefix: u8) -> IpAddr {
    match addr {
        IpAddr::V4(a) => {
            let mut octets = a.octets();
            zero_host_bits(&mut octets, prefix);
            IpAddr::from(octets)
        }
        IpAddr::V6(a) => {
            let mut octets = a.octets();
            zero_host_bits(&mut octets, prefix);
            IpAddr::from(octets)
        }
    }
}

fn zero_host_bits(octets: &mut [u8], prefix: u8) {
    let mut remaining = prefix;
    for byte in octets.iter_mut() {
        let take = remaining.min(8);
        *byte &= if take == 0 { 0 } else { 0xff << (8 - take) };
        remaining -= take;
    }
}

impl FromStr for Cidr {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Cidr, PoolError> {
        Cidr::new(s)
    }
}

impl std::fmt::Display for Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

impl Serialize for Cidr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
