//! # Adoption Common
//!
//! Shared types, utilities, and common functionality for the MedTech adoption
//! dashboard.
//!
//! This crate provides the foundational error type, logging setup and display
//! helpers used across all other crates in the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

// Re-export commonly used types
pub use error::{AdoptionError, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use types::*;
pub use utils::*;
