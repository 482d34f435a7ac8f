//! Error types for docker-subnet-pool.
//!
//! Every failure the core can produce is a distinct variant here, so callers
//! can tell a runtime-command failure apart from a decode problem or an
//! exhausted address space without string matching.

use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for pool derivation operations.
pub type Result<T> = std::result::Result<T, PoolError>;

/// Main error type for pool derivation.
#[derive(Error, Debug)]
pub enum PoolError {
    /// The inspection command could not be started or waited on.
    #[error("failed to run `{command}`: {source}")]
    Process {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The inspection command ran but exited with a failure status.
    #[error("`{command}` exited with {status}")]
    ProcessFailed { command: String, status: ExitStatus },

    /// The inspection output was not valid JSON of the expected shape.
    ///
    /// `path` is the location inside the document where decoding failed,
    /// e.g. `[0].IPAM.Config[1].Subnet`.
    #[error("decoding `{command}` output at {path}: {source}")]
    Decode {
        command: String,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The inspection returned zero or more than one network entry when
    /// exactly one was required.
    #[error("expected exactly one network named {name:?}, saw {count}")]
    Cardinality { name: String, count: usize },

    /// A `Subnet` string from the runtime did not parse as address/prefix.
    #[error("invalid CIDR {input:?}: {reason}")]
    InvalidCidr { input: String, reason: String },

    /// The parent prefix leaves no room to carve a strictly smaller child.
    #[error("not enough addresses in {cidr} to carve a pool")]
    AddressSpaceExhausted { cidr: String },

    /// The task draining the inspection output panicked or was cancelled.
    #[error("inspect reader task failed: {0}")]
    ReaderTask(String),
}
