//! Subnet processing logic.
//!
//! - [`bisect`] - midpoint subnet derivation

mod bisect;

// Re-export public functions
pub use bisect::midpoint_subnet;
