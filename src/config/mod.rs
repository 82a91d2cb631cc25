//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (batch size, bind limits, etc.)
//! - Library configuration types
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Cli, Command, SaveArgs};
pub use constants::*;
pub use types::{Config, KeyStrategy, LogFormat, LogLevel};
