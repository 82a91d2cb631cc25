//! Record kinds and their save order.

use strum_macros::EnumIter as EnumIterMacro;

/// The kinds of records the bulk saver accepts.
///
/// Declaration order is the save order: every kind only references kinds
/// declared before it, so saving in this order never writes a row whose
/// foreign keys point at rows that don't exist yet. `Ord` and
/// `RecordKind::iter()` both follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIterMacro)]
pub enum RecordKind {
    SharedText,
    Issue,
    IssueInstanceFixInfo,
    IssueInstance,
    IssueInstanceSharedTextAssoc,
    TraceFrame,
    IssueInstanceTraceFrameAssoc,
    TraceFrameAnnotation,
    TraceFrameLeafAssoc,
    TraceFrameAnnotationTraceFrameAssoc,
    Feature,
    IssueInstanceFeatureAssoc,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl RecordKind {
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::SharedText => "SharedText",
            RecordKind::Issue => "Issue",
            RecordKind::IssueInstanceFixInfo => "IssueInstanceFixInfo",
            RecordKind::IssueInstance => "IssueInstance",
            RecordKind::IssueInstanceSharedTextAssoc => "IssueInstanceSharedTextAssoc",
            RecordKind::TraceFrame => "TraceFrame",
            RecordKind::IssueInstanceTraceFrameAssoc => "IssueInstanceTraceFrameAssoc",
            RecordKind::TraceFrameAnnotation => "TraceFrameAnnotation",
            RecordKind::TraceFrameLeafAssoc => "TraceFrameLeafAssoc",
            RecordKind::TraceFrameAnnotationTraceFrameAssoc => {
                "TraceFrameAnnotationTraceFrameAssoc"
            }
            RecordKind::Feature => "Feature",
            RecordKind::IssueInstanceFeatureAssoc => "IssueInstanceFeatureAssoc",
        }
    }

    /// Table the kind is stored in. Also the key of its `primary_keys` counter.
    pub fn table_name(&self) -> &'static str {
        match self {
            RecordKind::SharedText => "shared_texts",
            RecordKind::Issue => "issues",
            RecordKind::IssueInstanceFixInfo => "issue_instance_fix_info",
            RecordKind::IssueInstance => "issue_instances",
            RecordKind::IssueInstanceSharedTextAssoc => "issue_instance_shared_text_assoc",
            RecordKind::TraceFrame => "trace_frames",
            RecordKind::IssueInstanceTraceFrameAssoc => "issue_instance_trace_frame_assoc",
            RecordKind::TraceFrameAnnotation => "trace_frame_annotations",
            RecordKind::TraceFrameLeafAssoc => "trace_frame_leaf_assoc",
            RecordKind::TraceFrameAnnotationTraceFrameAssoc => {
                "trace_frame_annotation_trace_frame_assoc"
            }
            RecordKind::Feature => "features",
            RecordKind::IssueInstanceFeatureAssoc => "issue_instance_feature_assoc",
        }
    }

    /// Whether rows of this kind have an `id` column that needs a reserved key.
    /// Association tables are keyed by their foreign keys instead.
    pub fn has_primary_key(&self) -> bool {
        matches!(
            self,
            RecordKind::SharedText
                | RecordKind::Issue
                | RecordKind::IssueInstanceFixInfo
                | RecordKind::IssueInstance
                | RecordKind::TraceFrame
                | RecordKind::TraceFrameAnnotation
                | RecordKind::Feature
        )
    }
}
