//! Configuration constants.
//!
//! This module defines the operational parameters of the bulk saver.

/// Rows written per transaction.
///
/// Bounds transaction size (and the memory held by one chunk of prepared rows)
/// while still amortizing the commit cost over many rows.
pub const DEFAULT_BATCH_SIZE: usize = 30_000;

/// Upper bound on bind parameters in a single statement.
///
/// SQLite's `SQLITE_MAX_VARIABLE_NUMBER` defaults to 32766 since 3.32; stay a
/// little below it. Multi-row inserts and `IN (...)` lookups are split so that
/// `rows * columns` never exceeds this.
pub const MAX_BIND_PARAMS: usize = 32_000;

/// Default database path when neither `--db-path` nor `BULK_SAVER_DB_PATH` is set.
pub const DB_PATH: &str = "./bulk_saver.db";

/// Environment variable consulted for the database path.
pub const DB_PATH_ENV: &str = "BULK_SAVER_DB_PATH";
