//! Domain models for docker-subnet-pool.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`Cidr`] - a network as address plus prefix length, IPv4 or IPv6
//! - [`NetworkInspect`] and friends - the runtime's IPAM descriptor shape

mod cidr;
mod ipam;

// Re-export public types
pub use cidr::Cidr;
pub use ipam::{Ipam, IpamConfig, NetworkInspect};
