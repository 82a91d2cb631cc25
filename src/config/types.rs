//! Configuration types.
//!
//! This module defines enums and structs shared by the library configuration
//! and the command-line parser.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::{DB_PATH, DEFAULT_BATCH_SIZE};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How primary keys are reserved before inserting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KeyStrategy {
    /// Persistent counters in the `primary_keys` table (default)
    Table,
    /// Continue after the current `MAX(id)` of each table
    MaxId,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use bulk_saver::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input: PathBuf::from("records.jsonl"),
///     batch_size: 10_000,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// JSONL file to read records from
    pub input: PathBuf,

    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Rows written per transaction
    pub batch_size: usize,

    /// Write NULL for unset optional columns instead of omitting them
    pub render_nulls: bool,

    /// Primary key reservation strategy
    pub key_strategy: KeyStrategy,

    /// Load and count records without writing them
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("records.jsonl"),
            db_path: PathBuf::from(DB_PATH),
            batch_size: DEFAULT_BATCH_SIZE,
            render_nulls: true,
            key_strategy: KeyStrategy::Table,
            dry_run: false,
        }
    }
}
