//! Key reservation backed by the `primary_keys` counter table.

use async_trait::async_trait;
use log::debug;
use sqlx::SqlitePool;

use super::{keyed_counts, KeyRanges, PrimaryKeyGenerator};
use crate::error_handling::{DatabaseError, KeyError};
use crate::models::RecordKind;

/// Reserves keys by advancing a persistent per-table counter.
///
/// A missing counter is seeded from the table's current `MAX(id)`. The
/// counter is never advanced from below `MAX(id)`, so rows written without
/// going through the counter cannot be handed out again.
#[derive(Debug, Default)]
pub struct TableKeyGenerator {
    ranges: KeyRanges,
}

impl TableKeyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self, kind: RecordKind) -> usize {
        self.ranges.remaining(kind)
    }
}

#[async_trait]
impl PrimaryKeyGenerator for TableKeyGenerator {
    async fn reserve(
        &mut self,
        pool: &SqlitePool,
        counts: &[(RecordKind, usize)],
    ) -> Result<(), DatabaseError> {
        let mut tx = pool.begin().await?;

        for (kind, count) in keyed_counts(counts) {
            let table = kind.table_name();

            let seed = format!(
                "INSERT OR IGNORE INTO primary_keys (table_name, current_id)
                 SELECT ?, COALESCE(MAX(id), 0) FROM {table}"
            );
            sqlx::query(&seed).bind(table).execute(&mut *tx).await?;

            let advance = format!(
                "UPDATE primary_keys
                 SET current_id = MAX(current_id, (SELECT COALESCE(MAX(id), 0) FROM {table})) + ?
                 WHERE table_name = ?
                 RETURNING current_id"
            );
            let last: i64 = sqlx::query_scalar(&advance)
                .bind(count)
                .bind(table)
                .fetch_one(&mut *tx)
                .await?;

            let first = last - count + 1;
            debug!("Reserved {} ids for {}: {}..={}", count, kind, first, last);
            self.ranges.insert(kind, first, last);
        }

        tx.commit().await?;
        Ok(())
    }

    fn next_id(&mut self, kind: RecordKind) -> Result<i64, KeyError> {
        self.ranges.take(kind)
    }
}
