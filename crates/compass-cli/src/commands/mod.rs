//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `evaluate` - Status evaluation from flags and input files
//! - `levels` - Band table display
//! - `config` - Configuration inspection and validation

pub mod config;
pub mod evaluate;
pub mod levels;

// Re-export command functions for main.rs
pub use config::*;
pub use evaluate::*;
pub use levels::*;
