// storage/mod.rs
// Database operations module

pub mod counts;
mod insert;
pub mod keys;
pub mod migrations;
pub mod pool;
mod prepare;
mod render;
mod row;
pub mod saver;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use counts::table_counts;
pub use keys::{MaxIdKeyGenerator, PrimaryKeyGenerator, TableKeyGenerator};
pub use migrations::run_migrations;
pub use pool::init_db_pool_with_path;
pub use saver::{BulkSaver, KindSummary, SaveSummary, SaverConfig};
