//! Error type definitions.
//!
//! This module defines all error types used throughout the crate.

use log::SetLoggerError;
use thiserror::Error;

use crate::models::RecordKind;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Error applying schema migrations.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

/// Errors handing out reserved primary keys.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    /// The kind is an association table and has no surrogate key.
    #[error("{0} has no primary key column")]
    NoPrimaryKey(RecordKind),

    /// `next_id` was called before any keys were reserved for the kind.
    #[error("no primary keys reserved for {0}")]
    NotReserved(RecordKind),

    /// Every key of the reserved range has been handed out.
    #[error("not enough primary keys reserved for {0}")]
    Exhausted(RecordKind),
}

/// Errors raised while flushing pending records.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Key(#[from] KeyError),

    /// A mandatory foreign key pointed at a record whose id was never assigned.
    #[error("{kind}.{column} references a record that has no id yet")]
    UnresolvedReference {
        kind: RecordKind,
        column: &'static str,
    },

    /// A record carried an explicit id that disagrees with the row it merges into.
    #[error("{kind} record has id {assigned} but matches existing row {existing}")]
    ConflictingId {
        kind: RecordKind,
        assigned: i64,
        existing: i64,
    },
}

impl From<sqlx::Error> for SaveError {
    fn from(e: sqlx::Error) -> Self {
        SaveError::Database(DatabaseError::SqlError(e))
    }
}

/// Errors reading a JSONL record file.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: malformed record: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: ref '{reference}' is already defined")]
    DuplicateReference { line: usize, reference: String },

    #[error("line {line}: unknown ref '{reference}'")]
    UnknownReference { line: usize, reference: String },

    #[error("line {line}: ref '{reference}' is a {found}, expected {expected}")]
    WrongKind {
        line: usize,
        reference: String,
        expected: RecordKind,
        found: RecordKind,
    },
}
