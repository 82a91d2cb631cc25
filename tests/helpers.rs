// Shared test helpers for database setup and test data creation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::io::Write;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::NamedTempFile;

use bulk_saver::models::RecordKind;
use bulk_saver::run_migrations;

/// Creates a test database pool with migrations applied.
/// Uses an in-memory database on a single connection for fast test execution.
#[allow(dead_code)] // Used by other test files
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

/// Counts the rows stored for `kind`.
#[allow(dead_code)] // Used by other test files
pub async fn count_rows(pool: &SqlitePool, kind: RecordKind) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", kind.table_name()))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}

/// Writes `contents` to a temporary JSONL file.
#[allow(dead_code)] // Used by other test files
pub fn write_input(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write input file");
    file
}

/// A complete small run: one issue with one instance, a two-frame trace with
/// a leaf, an annotation, a fix, and a feature.
#[allow(dead_code)] // Used by other test files
pub const SAMPLE_RUN: &str = r#"
{"type": "shared_text", "ref": "callable", "contents": "app.views.index", "kind": "callable"}
{"type": "shared_text", "ref": "helper", "contents": "app.db.execute", "kind": "callable"}
{"type": "shared_text", "ref": "file", "contents": "app/views.py", "kind": "filename"}
{"type": "shared_text", "ref": "msg", "contents": "User input reaches SQL", "kind": "message"}
{"type": "shared_text", "ref": "source", "contents": "UserControlled", "kind": "source"}
{"type": "shared_text", "ref": "sink", "contents": "SQL", "kind": "sink"}
{"type": "issue", "ref": "issue", "handle": "app.views.index:5005:0:Call|app.db.execute|0|formal(query):abc", "code": 5005, "callable": "callable", "detected_time": 1700000000}
{"type": "issue_instance_fix_info", "ref": "fix", "fix_info": "use parameterized queries"}
{"type": "issue_instance", "ref": "instance", "run_id": 1, "issue": "issue", "location": {"line": 12, "begin_column": 4, "end_column": 30}, "filename": "file", "callable": "callable", "message": "msg", "is_new_issue": true, "fix_info": "fix", "min_trace_length_to_sources": 0, "min_trace_length_to_sinks": 1, "callable_count": 1}
{"type": "issue_instance_shared_text_assoc", "issue_instance": "instance", "shared_text": "source"}
{"type": "issue_instance_shared_text_assoc", "issue_instance": "instance", "shared_text": "sink"}
{"type": "trace_frame", "ref": "pre", "kind": "precondition", "caller": "callable", "caller_port": "root", "callee": "helper", "callee_port": "formal(query)", "callee_location": {"line": 12, "begin_column": 4, "end_column": 30}, "filename": "file", "run_id": 1}
{"type": "trace_frame", "ref": "post", "kind": "postcondition", "caller": "callable", "caller_port": "root", "callee": "source", "callee_port": "source", "callee_location": {"line": 10, "begin_column": 8, "end_column": 20}, "filename": "file", "run_id": 1, "titos": [{"line": 11, "begin_column": 1, "end_column": 5}], "type_interval_lower": 3, "type_interval_upper": 9}
{"type": "issue_instance_trace_frame_assoc", "issue_instance": "instance", "trace_frame": "pre"}
{"type": "issue_instance_trace_frame_assoc", "issue_instance": "instance", "trace_frame": "post"}
{"type": "trace_frame_annotation", "ref": "note", "trace_frame": "post", "location": {"line": 11, "begin_column": 1, "end_column": 5}, "message": "via format string", "leaf": "source"}
{"type": "trace_frame_leaf_assoc", "trace_frame": "pre", "leaf": "sink", "trace_length": 0}
{"type": "trace_frame_leaf_assoc", "trace_frame": "post", "leaf": "source"}
{"type": "trace_frame_annotation_trace_frame_assoc", "trace_frame_annotation": "note", "trace_frame": "post"}
{"type": "feature", "ref": "feature", "name": "always-via-format-string"}
{"type": "issue_instance_feature_assoc", "issue_instance": "instance", "feature": "feature"}
"#;
