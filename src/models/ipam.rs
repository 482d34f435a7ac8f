//! IPAM descriptor shape of the runtime's `network inspect` output.
//!
//! Only the fields the core consumes are modeled; everything else in the
//! inspect document is ignored. A network with no IPAM section decodes to an
//! empty config list rather than failing.

use serde::Deserialize;

/// One element of the JSON array printed by `<runtime> network inspect`.
#[derive(Deserialize, Debug, Default)]
pub struct NetworkInspect {
    /// The network's IP address management configuration.
    #[serde(rename = "IPAM", default)]
    pub ipam: Ipam,
}

/// The `IPAM` section of an inspect entry.
#[derive(Deserialize, Debug, Default)]
pub struct Ipam {
    /// One entry per subnet assigned to the network, in source order.
    #[serde(rename = "Config", default)]
    pub config: Vec<IpamConfig>,
}

/// A single IPAM subnet entry.
#[derive(Deserialize, Debug)]
pub struct IpamConfig {
    /// The subnet in CIDR notation, e.g. `"172.18.0.0/16"`.
    #[serde(rename = "Subnet")]
    pub subnet: String,
}
