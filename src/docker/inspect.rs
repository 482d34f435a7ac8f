//! Network inspection.
//!
//! Asks the container runtime for a named network and pulls the subnet
//! CIDRs out of its IPAM configuration.

use super::cli;
use crate::config;
use crate::error::PoolError;
use crate::models::NetworkInspect;

/// Return the CIDR strings of `name`'s IPAM configuration, in source order.
///
/// Runs `<runtime> network inspect <name>`. If `runtime` is `None` the
/// configured default (see [`config::runtime_command`]) is used; multi-word
/// values like `sudo docker` are split with quoted substrings preserved.
///
/// # Returns
/// * `Ok(Vec<String>)` - One CIDR per IPAM `Config` entry (possibly none)
/// * `Err(PoolError::Cardinality)` - If the runtime reported a number of
///   networks other than one
/// * `Err` - Process or decode failures, surfaced verbatim
pub async fn network_subnets(runtime: Option<&str>, name: &str) -> Result<Vec<String>, PoolError> {
    let runtime = match runtime {
        Some(runtime) => runtime.to_string(),
        None => config::runtime_command(),
    };

    let mut argv = cli::split_and_strip(&runtime);
    if argv.is_empty() {
        return Err(PoolError::Process {
            command: runtime.clone(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "runtime command is empty",
            ),
        });
    }
    let program = argv.remove(0);
    argv.extend(["network", "inspect", name]);

    let mut networks: Vec<NetworkInspect> = cli::run_json(program, &argv).await?;

    if networks.len() != 1 {
        return Err(PoolError::Cardinality {
            name: name.to_string(),
            count: networks.len(),
        });
    }

    let network = networks.remove(0);
    let subnets: Vec<String> = network
        .ipam
        .config
        .into_iter()
        .map(|config| config.subnet)
        .collect();

    log::info!(
        "network {name} has {count} subnet(s): {subnets:?}",
        count = subnets.len()
    );
    Ok(subnets)
}
