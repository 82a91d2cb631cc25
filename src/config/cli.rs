//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::constants::{DB_PATH, DB_PATH_ENV, DEFAULT_BATCH_SIZE};
use crate::config::types::{Config, KeyStrategy, LogFormat, LogLevel};

/// Bulk saves analysis records into a SQLite database.
#[derive(Debug, Parser)]
#[command(name = "bulk_saver", version, about)]
pub struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Database path (SQLite file)
    #[arg(long, env = DB_PATH_ENV, default_value = DB_PATH, global = true)]
    pub db_path: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load records from a JSONL file and bulk save them
    Save(SaveArgs),
    /// Print the number of stored rows per table
    Counts,
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// JSONL file with one record per line
    pub input: PathBuf,

    /// Rows written per transaction
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE as u64, value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_size: u64,

    /// Omit unset optional columns instead of writing NULL
    #[arg(long)]
    pub omit_nulls: bool,

    /// Primary key reservation strategy
    #[arg(long, value_enum, default_value_t = KeyStrategy::Table)]
    pub key_strategy: KeyStrategy,

    /// Load and count records without writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Builds the library configuration for the `save` subcommand.
    pub fn save_config(&self, args: &SaveArgs) -> Config {
        Config {
            input: args.input.clone(),
            db_path: self.db_path.clone(),
            batch_size: usize::try_from(args.batch_size).unwrap_or(usize::MAX),
            render_nulls: !args.omit_nulls,
            key_strategy: args.key_strategy,
            dry_run: args.dry_run,
        }
    }
}
