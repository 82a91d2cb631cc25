//! bulk_saver library: bulk persistence of analysis records
//!
//! Records created during an analysis run are registered with a [`BulkSaver`]
//! and written to SQLite in one flush at the end of the run. The flush
//! reserves primary keys for all pending rows up front, writes kinds in a
//! fixed dependency order, and batches rows into multi-row inserts inside
//! fixed-size transactions.
//!
//! # Example
//!
//! ```no_run
//! use bulk_saver::{init_db_pool_with_path, run_migrations, BulkSaver};
//! use bulk_saver::models::{Feature, SharedText, SharedTextKind};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = init_db_pool_with_path(std::path::Path::new("run.db")).await?;
//! run_migrations(&pool).await?;
//!
//! let mut saver = BulkSaver::new();
//! saver.add(SharedText::new(SharedTextKind::Callable, "app.views.index"));
//! saver.add(Feature::new("always-via-format-string"));
//!
//! let summary = saver.save_all(&pool).await?;
//! println!("Wrote {} rows", summary.total_inserted());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod input;
pub mod models;
mod run;
pub mod storage;

// Re-export public API
pub use config::{Config, KeyStrategy, LogFormat, LogLevel};
pub use error_handling::{DatabaseError, InputError, KeyError, SaveError};
pub use run::{open_database, run_save, SaveReport};
pub use storage::{
    init_db_pool_with_path, run_migrations, table_counts, BulkSaver, KindSummary,
    MaxIdKeyGenerator, PrimaryKeyGenerator, SaveSummary, SaverConfig, TableKeyGenerator,
};
