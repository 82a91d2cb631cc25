//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `bulk_saver` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use bulk_saver::config::{Cli, Command};
use bulk_saver::initialization::init_logger_with;
use bulk_saver::{open_database, run_save, table_counts};

#[tokio::main]
async fn main() -> Result<()> {
    // Load BULK_SAVER_DB_PATH and RUST_LOG from .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let outcome = match &cli.command {
        Command::Save(args) => save(cli.save_config(args)).await,
        Command::Counts => counts(&cli).await,
    };

    if let Err(e) = outcome {
        eprintln!("bulk_saver error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn save(config: bulk_saver::Config) -> Result<()> {
    let report = run_save(config).await?;
    if report.dry_run {
        println!(
            "Loaded {} record{} (dry run, nothing written)",
            report.loaded,
            if report.loaded == 1 { "" } else { "s" }
        );
        return Ok(());
    }

    println!(
        "Saved {} row{} ({} merged into existing rows) from {} records in {:.1}s",
        report.inserted,
        if report.inserted == 1 { "" } else { "s" },
        report.merged,
        report.loaded,
        report.elapsed_seconds
    );
    for kind in &report.summary.kinds {
        println!(
            "  {:<40} {:>8} inserted {:>8} merged {:>6} statements",
            kind.kind.name(),
            kind.inserted,
            kind.merged,
            kind.statements
        );
    }
    println!("Results saved in {}", report.db_path.display());
    Ok(())
}

async fn counts(cli: &Cli) -> Result<()> {
    let pool = open_database(&cli.db_path).await?;
    let counts = table_counts(&pool)
        .await
        .context("Failed to count stored rows")?;
    for (kind, count) in counts {
        println!("{:<40} {:>10}", kind.name(), count);
    }
    pool.close().await;
    Ok(())
}
