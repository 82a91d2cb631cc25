//! Key reservation that continues after the highest stored id.

use async_trait::async_trait;
use log::debug;
use sqlx::SqlitePool;

use super::{keyed_counts, KeyRanges, PrimaryKeyGenerator};
use crate::error_handling::{DatabaseError, KeyError};
use crate::models::RecordKind;

/// Reserves keys directly after each table's `MAX(id)`.
///
/// Nothing is persisted, so two generators reserving against the same store
/// before either has inserted will hand out the same keys. Only use it when
/// one saver writes to the store at a time.
#[derive(Debug, Default)]
pub struct MaxIdKeyGenerator {
    ranges: KeyRanges,
}

impl MaxIdKeyGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PrimaryKeyGenerator for MaxIdKeyGenerator {
    async fn reserve(
        &mut self,
        pool: &SqlitePool,
        counts: &[(RecordKind, usize)],
    ) -> Result<(), DatabaseError> {
        for (kind, count) in keyed_counts(counts) {
            let query = format!("SELECT COALESCE(MAX(id), 0) FROM {}", kind.table_name());
            let max_id: i64 = sqlx::query_scalar(&query).fetch_one(pool).await?;

            debug!("Reserved {} ids for {} after {}", count, kind, max_id);
            self.ranges.insert(kind, max_id + 1, max_id + count);
        }
        Ok(())
    }

    fn next_id(&mut self, kind: RecordKind) -> Result<i64, KeyError> {
        self.ranges.take(kind)
    }
}
