//! Library entry points used by the binary.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use sqlx::SqlitePool;

use crate::config::{Config, KeyStrategy};
use crate::input::load_records;
use crate::models::Record;
use crate::storage::{
    init_db_pool_with_path, run_migrations, BulkSaver, MaxIdKeyGenerator, PrimaryKeyGenerator,
    SaveSummary, SaverConfig, TableKeyGenerator,
};

/// Results of a save run.
#[derive(Debug, Clone)]
pub struct SaveReport {
    /// Records read from the input file
    pub loaded: usize,
    /// Rows written
    pub inserted: usize,
    /// Records resolved to rows that already existed
    pub merged: usize,
    /// Path to the SQLite database
    pub db_path: PathBuf,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
    /// Whether writing was skipped
    pub dry_run: bool,
    /// Per-kind details (empty for dry runs)
    pub summary: SaveSummary,
}

/// Opens (creating if needed) the database at `db_path` and applies migrations.
pub async fn open_database(db_path: &Path) -> Result<SqlitePool> {
    let pool = init_db_pool_with_path(db_path)
        .await
        .context("Failed to initialize database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(pool)
}

/// Loads the records in `config.input` and bulk saves them.
///
/// # Errors
///
/// Fails if the input file cannot be read or parsed, the database cannot be
/// opened, or saving fails. Nothing is written when the input is invalid.
pub async fn run_save(config: Config) -> Result<SaveReport> {
    let started = Instant::now();

    let records = load_records(&config.input)
        .await
        .with_context(|| format!("Failed to load records from {}", config.input.display()))?;
    let loaded = records.len();
    info!("Loaded {} records from {}", loaded, config.input.display());

    let summary = match config.key_strategy {
        KeyStrategy::Table => save_with(TableKeyGenerator::new(), &config, records).await?,
        KeyStrategy::MaxId => save_with(MaxIdKeyGenerator::new(), &config, records).await?,
    };

    Ok(SaveReport {
        loaded,
        inserted: summary.total_inserted(),
        merged: summary.total_merged(),
        db_path: config.db_path,
        elapsed_seconds: started.elapsed().as_secs_f64(),
        dry_run: config.dry_run,
        summary,
    })
}

async fn save_with<G: PrimaryKeyGenerator>(
    key_generator: G,
    config: &Config,
    records: Vec<Record>,
) -> Result<SaveSummary> {
    let mut saver = BulkSaver::with_key_generator(key_generator).with_config(SaverConfig {
        batch_size: config.batch_size,
        render_nulls: config.render_nulls,
    });
    saver.add_all(records);
    info!("Pending records:\n{}", saver.dump_stats().trim_end());

    if config.dry_run {
        info!("Dry run, nothing written");
        return Ok(SaveSummary::default());
    }

    let pool = open_database(&config.db_path).await?;
    let summary = saver
        .save_all(&pool)
        .await
        .context("Failed to save records")?;
    pool.close().await;
    Ok(summary)
}
