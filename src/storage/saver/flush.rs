//! Flushing pending records to the database.

use std::time::Instant;

use log::{debug, info};
use sqlx::SqlitePool;

use crate::error_handling::SaveError;
use crate::models::RecordKind;
use crate::storage::insert::insert_rows;
use crate::storage::keys::PrimaryKeyGenerator;
use crate::storage::prepare::{prepare, Prepared};

use super::types::{KindSummary, SaveSummary};
use super::BulkSaver;

impl<G: PrimaryKeyGenerator> BulkSaver<G> {
    /// Writes every pending record to the database.
    ///
    /// Keys for all pending kinds are reserved up front in one step, then
    /// kinds are saved one after another in save order. There is no retry: on
    /// error, chunks that were already committed stay in the database, the
    /// records of the kind being saved are gone, and kinds not reached yet
    /// remain pending.
    pub async fn save_all(&mut self, pool: &SqlitePool) -> Result<SaveSummary, SaveError> {
        let counts: Vec<(RecordKind, usize)> = self
            .pending
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(kind, records)| (*kind, records.len()))
            .collect();

        let mut summary = SaveSummary::default();
        if counts.is_empty() {
            debug!("Nothing to save");
            return Ok(summary);
        }

        self.key_generator.reserve(pool, &counts).await?;

        for (kind, _) in counts {
            info!("Saving {}...", kind);
            summary.kinds.push(self.save_kind(pool, kind).await?);
        }

        Ok(summary)
    }

    async fn save_kind(
        &mut self,
        pool: &SqlitePool,
        kind: RecordKind,
    ) -> Result<KindSummary, SaveError> {
        let started = Instant::now();
        let records = self
            .pending
            .get_mut(&kind)
            .map(std::mem::take)
            .unwrap_or_default();

        let Prepared { mut rows, merged } = prepare(
            pool,
            kind,
            records,
            &mut self.key_generator,
            self.config.render_nulls,
        )
        .await?;

        // Multi-row INSERTs can only group rows with the same column list;
        // a stable sort keeps those rows adjacent.
        rows.sort_by(|a, b| a.columns.cmp(&b.columns));

        let mut statements = 0;
        let mut transactions = 0;
        for chunk in rows.chunks(self.config.batch_size) {
            let mut tx = pool.begin().await?;
            statements += insert_rows(&mut tx, kind.table_name(), chunk).await?;
            tx.commit().await?;
            transactions += 1;
            debug!("Committed {} {} rows", chunk.len(), kind);
        }

        info!(
            "Saved {} {} rows ({} merged) in {:.3}s",
            rows.len(),
            kind,
            merged,
            started.elapsed().as_secs_f64()
        );

        Ok(KindSummary {
            kind,
            inserted: rows.len(),
            merged,
            statements,
            transactions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DbId, Feature, Issue, IssueInstance, SharedText, SharedTextKind, SourceLocation,
        TraceFrame, TraceFrameLeafAssoc, TraceKind,
    };
    use crate::error_handling::{DatabaseError, KeyError};
    use crate::storage::keys::{KeyRanges, MaxIdKeyGenerator, TableKeyGenerator};
    use crate::storage::saver::SaverConfig;
    use crate::storage::test_helpers::{count_rows, create_test_pool, key_counter};

    fn text(kind: SharedTextKind, contents: &str) -> SharedText {
        SharedText::new(kind, contents)
    }

    /// Hands out keys from 100 upward without touching the database.
    #[derive(Default)]
    struct CountingKeys {
        reserve_calls: usize,
        ranges: KeyRanges,
    }

    #[async_trait::async_trait]
    impl PrimaryKeyGenerator for CountingKeys {
        async fn reserve(
            &mut self,
            _pool: &SqlitePool,
            counts: &[(RecordKind, usize)],
        ) -> Result<(), DatabaseError> {
            self.reserve_calls += 1;
            for &(kind, count) in counts {
                if kind.has_primary_key() && count > 0 {
                    self.ranges.insert(kind, 100, 99 + count as i64);
                }
            }
            Ok(())
        }

        fn next_id(&mut self, kind: RecordKind) -> Result<i64, KeyError> {
            self.ranges.take(kind)
        }
    }

    #[tokio::test]
    async fn test_save_all_with_nothing_pending() {
        let pool = create_test_pool().await;
        let mut saver = BulkSaver::new();
        let summary = saver.save_all(&pool).await.unwrap();
        assert!(summary.kinds.is_empty());
        assert_eq!(key_counter(&pool, RecordKind::SharedText).await, None);
    }

    #[tokio::test]
    async fn test_parents_are_written_before_children() {
        let pool = create_test_pool().await;
        let mut saver = BulkSaver::new();

        let callable = text(SharedTextKind::Callable, "app.views.index");
        let filename = text(SharedTextKind::Filename, "app/views.py");
        let message = text(SharedTextKind::Message, "User data reaches SQL");
        let issue = Issue {
            handle: "app.views.index:5005:0:abc".to_string(),
            code: 5005,
            callable_id: callable.id.clone(),
            detected_time: 1_700_000_000,
            ..Default::default()
        };
        let instance = IssueInstance {
            run_id: 1,
            issue_id: issue.id.clone(),
            location: SourceLocation::new(10, 4, 20),
            filename_id: filename.id.clone(),
            callable_id: callable.id.clone(),
            message_id: message.id.clone(),
            is_new_issue: true,
            ..Default::default()
        };

        // Children registered first; save order still puts parents first.
        saver.add_issue_instance_shared_text_assoc(&instance, &message);
        saver.add(instance.clone());
        saver.add(issue.clone());
        saver.add_all(vec![callable.clone(), filename.clone(), message.clone()]);

        let summary = saver.save_all(&pool).await.unwrap();

        let order: Vec<RecordKind> = summary.kinds.iter().map(|k| k.kind).collect();
        assert_eq!(
            order,
            vec![
                RecordKind::SharedText,
                RecordKind::Issue,
                RecordKind::IssueInstance,
                RecordKind::IssueInstanceSharedTextAssoc,
            ]
        );
        assert_eq!(summary.total_inserted(), 6);
        assert!(saver.is_empty());
        assert_eq!(instance.id.get(), Some(1));

        let stored_issue: i64 = sqlx::query_scalar("SELECT issue_id FROM issue_instances WHERE id = ?")
            .bind(instance.id.get())
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(Some(stored_issue), issue.id.get());
    }

    #[tokio::test]
    async fn test_chunks_are_separate_transactions() {
        let pool = create_test_pool().await;
        let mut saver = BulkSaver::new().with_config(SaverConfig {
            batch_size: 4,
            render_nulls: true,
        });
        saver.add_all((0..10).map(|i| Feature::new(format!("feature-{}", i))));

        let summary = saver.save_all(&pool).await.unwrap();
        let features = summary.get(RecordKind::Feature).unwrap();

        assert_eq!(features.inserted, 10);
        assert_eq!(features.transactions, 3);
        assert_eq!(features.statements, 3);
        assert_eq!(count_rows(&pool, RecordKind::Feature).await, 10);
    }

    #[tokio::test]
    async fn test_second_run_merges_and_continues_keys() {
        let pool = create_test_pool().await;

        let mut first = BulkSaver::new();
        first.add(text(SharedTextKind::Callable, "a"));
        first.add(text(SharedTextKind::Callable, "b"));
        first.save_all(&pool).await.unwrap();

        let mut second = BulkSaver::new();
        let again = text(SharedTextKind::Callable, "b");
        let fresh = text(SharedTextKind::Callable, "c");
        second.add_all(vec![again.clone(), fresh.clone()]);
        let summary = second.save_all(&pool).await.unwrap();

        let texts = summary.get(RecordKind::SharedText).unwrap();
        assert_eq!(texts.inserted, 1);
        assert_eq!(texts.merged, 1);
        assert_eq!(again.id.get(), Some(2));
        // Reserved 3..=4 for two records; the merged one leaves a gap.
        assert_eq!(fresh.id.get(), Some(3));
        assert_eq!(key_counter(&pool, RecordKind::SharedText).await, Some(4));
        assert_eq!(count_rows(&pool, RecordKind::SharedText).await, 3);
    }

    #[tokio::test]
    async fn test_omitted_nulls_use_column_defaults() {
        let pool = create_test_pool().await;
        let mut saver = BulkSaver::with_key_generator(MaxIdKeyGenerator::new()).with_config(
            SaverConfig {
                render_nulls: false,
                ..Default::default()
            },
        );

        let leaf = text(SharedTextKind::Source, "UserControlled");
        let caller = text(SharedTextKind::Callable, "caller");
        let file = text(SharedTextKind::Filename, "f.py");
        let frames: Vec<TraceFrame> = (0..4)
            .map(|i| TraceFrame {
                kind: TraceKind::Postcondition,
                caller_id: caller.id.clone(),
                caller_port: "result".to_string(),
                callee_id: leaf.id.clone(),
                callee_port: "source".to_string(),
                callee_location: SourceLocation::new(i, 1, 2),
                filename_id: file.id.clone(),
                run_id: 1,
                ..Default::default()
            })
            .collect();
        saver.add_all(vec![leaf.clone(), caller.clone(), file.clone()]);
        for (i, frame) in frames.iter().enumerate() {
            let depth = if i % 2 == 0 { Some(i as i64) } else { None };
            saver.add_trace_frame_leaf_assoc(&leaf, frame, depth);
        }
        saver.add_all(frames);

        let summary = saver.save_all(&pool).await.unwrap();

        // Alternating column lists sort into two runs, one statement each.
        assert_eq!(summary.get(RecordKind::TraceFrameLeafAssoc).unwrap().statements, 2);
        let nulls: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM trace_frame_leaf_assoc WHERE trace_length IS NULL",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(nulls, 2);
    }

    #[tokio::test]
    async fn test_unresolved_reference_stops_the_save() {
        let pool = create_test_pool().await;
        let mut saver = BulkSaver::with_key_generator(TableKeyGenerator::new());
        let frame_id = DbId::new();
        saver.add(Feature::new("kept"));
        saver.add(TraceFrameLeafAssoc {
            trace_frame_id: frame_id,
            leaf_id: DbId::existing(1),
            trace_length: None,
        });

        let err = saver.save_all(&pool).await.unwrap_err();

        assert!(matches!(
            err,
            SaveError::UnresolvedReference {
                kind: RecordKind::TraceFrameLeafAssoc,
                column: "trace_frame_id"
            }
        ));
        assert!(saver.pending(RecordKind::TraceFrameLeafAssoc).is_empty());
        // Feature is saved after the leaf assoc, so it was never reached.
        assert_eq!(saver.pending(RecordKind::Feature).len(), 1);
    }

    #[tokio::test]
    async fn test_custom_key_generator_reserves_once_per_save() {
        let pool = create_test_pool().await;
        let mut saver = BulkSaver::with_key_generator(CountingKeys::default());

        let callable = text(SharedTextKind::Callable, "app.main");
        let first = Feature::new("first");
        let second = Feature::new("second");
        saver.add(callable.clone());
        saver.add_all(vec![first.clone(), second.clone()]);

        saver.save_all(&pool).await.unwrap();

        assert_eq!(saver.key_generator().reserve_calls, 1);
        assert_eq!(callable.id.get(), Some(100));
        assert_eq!(first.id.get(), Some(100));
        assert_eq!(second.id.get(), Some(101));
        assert_eq!(count_rows(&pool, RecordKind::Feature).await, 2);

        // Nothing pending: no reservation at all.
        saver.save_all(&pool).await.unwrap();
        assert_eq!(saver.key_generator().reserve_calls, 1);
    }

    #[tokio::test]
    async fn test_failed_chunk_keeps_earlier_chunks_committed() {
        let pool = create_test_pool().await;
        let mut saver = BulkSaver::new().with_config(SaverConfig {
            batch_size: 1,
            render_nulls: true,
        });
        // Both rows claim id 1, so the second chunk violates the primary key.
        saver.add(Feature {
            id: DbId::existing(1),
            name: "first".to_string(),
        });
        saver.add(Feature {
            id: DbId::existing(1),
            name: "second".to_string(),
        });

        let err = saver.save_all(&pool).await.unwrap_err();

        assert!(matches!(err, SaveError::Database(_)));
        assert_eq!(count_rows(&pool, RecordKind::Feature).await, 1);
        assert!(saver.pending(RecordKind::Feature).is_empty());
    }
}
