//! Application initialization.
//!
//! Sets up process-wide facilities before any records are loaded. Database
//! pool creation lives in `storage::pool`.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
