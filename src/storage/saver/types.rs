//! Saver configuration and flush results.

use crate::config::DEFAULT_BATCH_SIZE;
use crate::models::RecordKind;

/// Configuration for the bulk saver.
#[derive(Debug, Clone)]
pub struct SaverConfig {
    /// Rows written per transaction
    pub batch_size: usize,
    /// Write NULL for unset optional columns instead of omitting them
    pub render_nulls: bool,
}

impl Default for SaverConfig {
    fn default() -> Self {
        SaverConfig {
            batch_size: DEFAULT_BATCH_SIZE,
            render_nulls: true,
        }
    }
}

/// What saving one kind did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindSummary {
    pub kind: RecordKind,
    /// Rows written
    pub inserted: usize,
    /// Records resolved to an already stored (or already written) row
    pub merged: usize,
    /// INSERT statements issued
    pub statements: usize,
    /// Transactions committed
    pub transactions: usize,
}

/// Result of a flush, one entry per saved kind in save order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveSummary {
    pub kinds: Vec<KindSummary>,
}

impl SaveSummary {
    pub fn get(&self, kind: RecordKind) -> Option<&KindSummary> {
        self.kinds.iter().find(|k| k.kind == kind)
    }

    pub fn total_inserted(&self) -> usize {
        self.kinds.iter().map(|k| k.inserted).sum()
    }

    pub fn total_merged(&self) -> usize {
        self.kinds.iter().map(|k| k.merged).sum()
    }
}
