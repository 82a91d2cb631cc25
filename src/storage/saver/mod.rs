//! Bulk saver.
//!
//! Collects the records created during a run and writes them in bulk when the
//! run ends. Records are bucketed by kind; `save_all` reserves keys for
//! everything pending in one step and then writes each kind in save order.

mod flush;
mod types;

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::models::{
    Feature, IssueInstance, IssueInstanceFeatureAssoc, IssueInstanceSharedTextAssoc,
    IssueInstanceTraceFrameAssoc, Record, RecordKind, SharedText, TraceFrame, TraceFrameAnnotation,
    TraceFrameAnnotationTraceFrameAssoc, TraceFrameLeafAssoc,
};

use super::keys::{PrimaryKeyGenerator, TableKeyGenerator};

pub use types::{KindSummary, SaveSummary, SaverConfig};

/// Stores new records created within a run and bulk saves them.
pub struct BulkSaver<G = TableKeyGenerator> {
    key_generator: G,
    pub(crate) config: SaverConfig,
    pub(crate) pending: BTreeMap<RecordKind, Vec<Record>>,
}

impl BulkSaver<TableKeyGenerator> {
    pub fn new() -> Self {
        Self::with_key_generator(TableKeyGenerator::new())
    }
}

impl Default for BulkSaver<TableKeyGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: PrimaryKeyGenerator> BulkSaver<G> {
    pub fn with_key_generator(key_generator: G) -> Self {
        BulkSaver {
            key_generator,
            config: SaverConfig::default(),
            pending: RecordKind::iter().map(|kind| (kind, Vec::new())).collect(),
        }
    }

    /// Replaces the configuration. A zero batch size is treated as one.
    pub fn with_config(mut self, config: SaverConfig) -> Self {
        self.config = SaverConfig {
            batch_size: config.batch_size.max(1),
            ..config
        };
        self
    }

    pub fn config(&self) -> &SaverConfig {
        &self.config
    }

    pub fn key_generator(&self) -> &G {
        &self.key_generator
    }

    pub fn add(&mut self, record: impl Into<Record>) {
        let record = record.into();
        self.pending.entry(record.kind()).or_default().push(record);
    }

    pub fn add_all<I>(&mut self, records: I)
    where
        I: IntoIterator,
        I::Item: Into<Record>,
    {
        for record in records {
            self.add(record);
        }
    }

    /// Records waiting to be saved for `kind`.
    pub fn pending(&self, kind: RecordKind) -> &[Record] {
        self.pending.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn pending_count(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.values().all(Vec::is_empty)
    }

    pub fn add_trace_frame_leaf_assoc(
        &mut self,
        message: &SharedText,
        trace_frame: &TraceFrame,
        depth: Option<i64>,
    ) {
        self.add(TraceFrameLeafAssoc {
            trace_frame_id: trace_frame.id.clone(),
            leaf_id: message.id.clone(),
            trace_length: depth,
        });
    }

    pub fn add_issue_instance_trace_frame_assoc(
        &mut self,
        issue_instance: &IssueInstance,
        trace_frame: &TraceFrame,
    ) {
        self.add(IssueInstanceTraceFrameAssoc {
            issue_instance_id: issue_instance.id.clone(),
            trace_frame_id: trace_frame.id.clone(),
        });
    }

    pub fn add_issue_instance_shared_text_assoc(
        &mut self,
        issue_instance: &IssueInstance,
        shared_text: &SharedText,
    ) {
        self.add(IssueInstanceSharedTextAssoc {
            issue_instance_id: issue_instance.id.clone(),
            shared_text_id: shared_text.id.clone(),
        });
    }

    pub fn add_issue_instance_feature_assoc(
        &mut self,
        issue_instance: &IssueInstance,
        feature: &Feature,
    ) {
        self.add(IssueInstanceFeatureAssoc {
            issue_instance_id: issue_instance.id.clone(),
            feature_id: feature.id.clone(),
        });
    }

    pub fn add_trace_frame_annotation_trace_frame_assoc(
        &mut self,
        trace_frame_annotation: &TraceFrameAnnotation,
        trace_frame: &TraceFrame,
    ) {
        self.add(TraceFrameAnnotationTraceFrameAssoc {
            trace_frame_annotation_id: trace_frame_annotation.id.clone(),
            trace_frame_id: trace_frame.id.clone(),
        });
    }

    /// Pending record counts, one `Kind: count` line per kind in save order.
    pub fn dump_stats(&self) -> String {
        RecordKind::iter()
            .map(|kind| format!("{}: {}\n", kind, self.pending(kind).len()))
            .collect()
    }
}
