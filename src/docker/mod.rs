//! Container runtime interaction.
//!
//! This module handles all runtime-facing operations:
//! - [`cli`] - Command execution with concurrent output decoding
//! - [`inspect`] - Network inspection and subnet extraction

mod cli;
mod inspect;

// Re-export public functions
pub use cli::{run_json, split_and_strip};
pub use inspect::network_subnets;
