//! Tests for the run_save library entry point.

mod helpers;

use helpers::{write_input, SAMPLE_RUN};

use bulk_saver::models::RecordKind;
use bulk_saver::{open_database, run_save, table_counts, Config, KeyStrategy};
use tempfile::TempDir;

fn config_for(input: &std::path::Path, dir: &TempDir) -> Config {
    Config {
        input: input.to_path_buf(),
        db_path: dir.path().join("run.db"),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_run_save_writes_all_records() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_input(SAMPLE_RUN);
    let config = config_for(input.path(), &dir);
    let db_path = config.db_path.clone();

    let report = run_save(config).await.expect("run_save should succeed");
    assert_eq!(report.loaded, 21);
    assert_eq!(report.inserted, 21);
    assert_eq!(report.merged, 0);
    assert!(!report.dry_run);
    assert_eq!(report.db_path, db_path);

    let pool = open_database(&db_path).await.expect("Database should open");
    let counts = table_counts(&pool).await.expect("Counts should load");
    let total: i64 = counts.iter().map(|(_, n)| n).sum();
    assert_eq!(total, 21);
    pool.close().await;
}

#[tokio::test]
async fn test_run_save_dry_run_creates_no_database() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_input(SAMPLE_RUN);
    let mut config = config_for(input.path(), &dir);
    config.dry_run = true;
    let db_path = config.db_path.clone();

    let report = run_save(config).await.expect("Dry run should succeed");
    assert_eq!(report.loaded, 21);
    assert_eq!(report.inserted, 0);
    assert!(report.summary.kinds.is_empty());
    assert!(!db_path.exists());
}

#[tokio::test]
async fn test_run_save_rejects_invalid_input_before_writing() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_input(
        r#"{"type": "feature", "ref": "f", "name": "ok"}
{"type": "issue_instance_feature_assoc", "issue_instance": "missing", "feature": "f"}
"#,
    );
    let config = config_for(input.path(), &dir);
    let db_path = config.db_path.clone();

    let err = run_save(config)
        .await
        .expect_err("Unknown reference should fail");
    let message = format!("{:#}", err);
    assert!(message.contains("Failed to load records"));
    assert!(message.contains("missing"));
    assert!(!db_path.exists());
}

#[tokio::test]
async fn test_run_save_missing_input_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = config_for(&dir.path().join("absent.jsonl"), &dir);

    assert!(run_save(config).await.is_err());
}

#[tokio::test]
async fn test_run_save_twice_with_max_id_strategy() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_input(SAMPLE_RUN);

    let first = run_save(config_for(input.path(), &dir))
        .await
        .expect("First run should succeed");
    assert_eq!(first.inserted, 21);

    let mut config = config_for(input.path(), &dir);
    config.key_strategy = KeyStrategy::MaxId;
    config.render_nulls = false;
    let second = run_save(config).await.expect("Second run should succeed");

    // Six shared texts, one issue and one feature resolve to existing rows.
    assert_eq!(second.merged, 8);
    assert_eq!(second.inserted, 13);
    let frames = second
        .summary
        .get(RecordKind::TraceFrame)
        .expect("Frames should be saved");
    assert_eq!(frames.inserted, 2);
}
