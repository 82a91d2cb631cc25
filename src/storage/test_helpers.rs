//! Shared test helpers for storage module tests.
//!
//! This module provides common utilities for database setup used across
//! storage module tests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::models::RecordKind;
use crate::storage::run_migrations;

/// Creates a test database pool with migrations applied.
/// Uses an in-memory database on a single connection so every query sees the
/// same database.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Number of rows stored for `kind`.
pub async fn count_rows(pool: &SqlitePool, kind: RecordKind) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", kind.table_name()))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}

/// Current value of the `primary_keys` counter for `kind`, if any.
pub async fn key_counter(pool: &SqlitePool, kind: RecordKind) -> Option<i64> {
    sqlx::query_scalar("SELECT current_id FROM primary_keys WHERE table_name = ?")
        .bind(kind.table_name())
        .fetch_optional(pool)
        .await
        .expect("Failed to read key counter")
}
