//! Error handling.
//!
//! Error types are grouped by the stage that raises them:
//! - **Initialization**: logger setup
//! - **Database**: pool, SQL and migration failures
//! - **Keys**: primary key reservation bookkeeping
//! - **Save**: flushing pending records
//! - **Input**: reading JSONL record files

mod types;

// Re-export public API
pub use types::{DatabaseError, InitializationError, InputError, KeyError, SaveError};
