// cargo watch -x 'fmt' -x 'run'  // 'run -- --some-arg'

pub mod config;
pub mod docker;
pub mod error;
pub mod models;
pub mod processing;

pub use error::PoolError;

use models::Cidr;

/// Derive one load-balancer address pool per subnet of `network`.
///
/// Asks the container runtime for the network's IPAM subnets and carves the
/// midpoint subnet out of each, preserving source order. `runtime` overrides
/// the inspection command (`None` uses the configured default).
///
/// Fails fast: the first bad subnet string or derivation failure aborts the
/// whole call.
pub async fn derive_address_pools(
    runtime: Option<&str>,
    network: &str,
) -> error::Result<Vec<Cidr>> {
    let subnets = docker::network_subnets(runtime, network).await?;

    let mut pools = Vec::with_capacity(subnets.len());
    for subnet in &subnets {
        let parent = Cidr::new(subnet)?;
        let pool = processing::midpoint_subnet(&parent)?;
        log::info!("derived pool {pool} from {parent}");
        pools.push(pool);
    }

    Ok(pools)
}
