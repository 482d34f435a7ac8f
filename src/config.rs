//! Runtime tunables.

/// Command used to talk to the container network runtime.
///
/// May be overridden (e.g. `podman`, `sudo docker`) via the
/// `NETWORK_RUNTIME` environment variable, loaded from `.env` by `main`.
pub const DEFAULT_RUNTIME: &str = "docker";

/// Network inspected when no name is given on the command line.
pub const DEFAULT_NETWORK: &str = "kind";

/// Resolve the runtime command, preferring the `NETWORK_RUNTIME` override.
pub fn runtime_command() -> String {
    std::env::var("NETWORK_RUNTIME").unwrap_or_else(|_| DEFAULT_RUNTIME.to_string())
}

/// Command-line selections.
#[derive(Debug, PartialEq, Eq)]
pub struct Args {
    /// Network to inspect.
    pub network: String,
    /// Output format: `text` or `json`.
    pub output: String,
}

/// Scan command-line arguments: `[network] [--output text|json]`.
///
/// Unknown flags and extra positionals are rejected rather than silently
/// taken as the network name.
pub fn parse_args<I>(args: I) -> Result<Args, String>
where
    I: IntoIterator<Item = String>,
{
    let mut network: Option<String> = None;
    let mut output = "text".to_string();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" | "-o" => {
                output = args
                    .next()
                    .ok_or_else(|| format!("missing value for {arg}"))?;
            }
            flag if flag.starts_with('-') => return Err(format!("unknown flag {flag:?}")),
            name => {
                if let Some(first) = &network {
                    return Err(format!(
                        "unexpected argument {name:?} (network already given as {first:?})"
                    ));
                }
                network = Some(name.to_string());
            }
        }
    }

    Ok(Args {
        network: network.unwrap_or_else(|| DEFAULT_NETWORK.to_string()),
        output,
    })
}
