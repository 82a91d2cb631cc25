//! Primary key reservation.
//!
//! Keys for every pending row are reserved in one round trip per kind before
//! anything is inserted, then handed out locally while rows are prepared.
//! The reservation strategy is pluggable through [`PrimaryKeyGenerator`].

mod max_id;
mod table;

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error_handling::{DatabaseError, KeyError};
use crate::models::RecordKind;

pub use max_id::MaxIdKeyGenerator;
pub use table::TableKeyGenerator;

/// Reserves ranges of primary keys and hands them out one at a time.
#[async_trait]
pub trait PrimaryKeyGenerator: Send {
    /// Reserves `count` keys for each `(kind, count)` entry.
    ///
    /// Entries for kinds without a primary key, or with a zero count, are
    /// ignored. A new reservation for a kind replaces any unused remainder of
    /// the previous one.
    async fn reserve(
        &mut self,
        pool: &SqlitePool,
        counts: &[(RecordKind, usize)],
    ) -> Result<(), DatabaseError>;

    /// Returns the next reserved key for `kind`.
    fn next_id(&mut self, kind: RecordKind) -> Result<i64, KeyError>;
}

/// Reserved key ranges, tracked as `next..=last` per kind.
#[derive(Debug, Default)]
pub struct KeyRanges {
    ranges: HashMap<RecordKind, (i64, i64)>,
}

impl KeyRanges {
    pub fn insert(&mut self, kind: RecordKind, first: i64, last: i64) {
        self.ranges.insert(kind, (first, last));
    }

    /// Keys still available for `kind`.
    pub fn remaining(&self, kind: RecordKind) -> usize {
        self.ranges
            .get(&kind)
            .map(|&(next, last)| usize::try_from(last - next + 1).unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn take(&mut self, kind: RecordKind) -> Result<i64, KeyError> {
        if !kind.has_primary_key() {
            return Err(KeyError::NoPrimaryKey(kind));
        }
        let (next, last) = self
            .ranges
            .get_mut(&kind)
            .ok_or(KeyError::NotReserved(kind))?;
        if *next > *last {
            return Err(KeyError::Exhausted(kind));
        }
        let id = *next;
        *next += 1;
        Ok(id)
    }
}

/// `(kind, count)` entries that actually need keys.
fn keyed_counts(counts: &[(RecordKind, usize)]) -> impl Iterator<Item = (RecordKind, i64)> + '_ {
    counts
        .iter()
        .filter(|(kind, count)| *count > 0 && kind.has_primary_key())
        .map(|&(kind, count)| (kind, i64::try_from(count).unwrap_or(i64::MAX)))
}
