//! Record structs, one per table.
//!
//! Entity records own a `DbId` that the saver resolves when it reserves keys.
//! Foreign keys are clones of the parent's `DbId`.

use super::id::DbId;
use super::kind::RecordKind;
use super::values::{IssueStatus, SharedTextKind, SourceLocation, TraceKind};

/// Interned text: callables, filenames, messages, sources, sinks, features.
#[derive(Debug, Clone, Default)]
pub struct SharedText {
    pub id: DbId,
    pub contents: String,
    pub kind: SharedTextKind,
}

impl SharedText {
    pub fn new(kind: SharedTextKind, contents: impl Into<String>) -> Self {
        SharedText {
            id: DbId::new(),
            contents: contents.into(),
            kind,
        }
    }
}

/// An issue, identified across runs by its handle.
#[derive(Debug, Clone, Default)]
pub struct Issue {
    pub id: DbId,
    pub handle: String,
    pub code: i64,
    pub callable_id: DbId,
    pub status: IssueStatus,
    pub detected_time: i64,
}

#[derive(Debug, Clone, Default)]
pub struct IssueInstanceFixInfo {
    pub id: DbId,
    pub fix_info: String,
}

/// One occurrence of an issue within a run.
#[derive(Debug, Clone, Default)]
pub struct IssueInstance {
    pub id: DbId,
    pub run_id: i64,
    pub issue_id: DbId,
    pub location: SourceLocation,
    pub filename_id: DbId,
    pub callable_id: DbId,
    pub message_id: DbId,
    pub is_new_issue: bool,
    pub fix_info_id: Option<DbId>,
    pub min_trace_length_to_sources: Option<i64>,
    pub min_trace_length_to_sinks: Option<i64>,
    pub callable_count: i64,
}

#[derive(Debug, Clone, Default)]
pub struct IssueInstanceSharedTextAssoc {
    pub issue_instance_id: DbId,
    pub shared_text_id: DbId,
}

/// A step of a trace from a caller port to a callee port.
#[derive(Debug, Clone, Default)]
pub struct TraceFrame {
    pub id: DbId,
    pub kind: TraceKind,
    pub caller_id: DbId,
    pub caller_port: String,
    pub callee_id: DbId,
    pub callee_port: String,
    pub callee_location: SourceLocation,
    pub filename_id: DbId,
    pub run_id: i64,
    pub titos: Vec<SourceLocation>,
    pub type_interval_lower: Option<i64>,
    pub type_interval_upper: Option<i64>,
    pub preserves_type_context: bool,
}

#[derive(Debug, Clone, Default)]
pub struct IssueInstanceTraceFrameAssoc {
    pub issue_instance_id: DbId,
    pub trace_frame_id: DbId,
}

#[derive(Debug, Clone, Default)]
pub struct TraceFrameAnnotation {
    pub id: DbId,
    pub trace_frame_id: DbId,
    pub location: SourceLocation,
    pub kind: Option<String>,
    pub message: String,
    pub leaf_id: Option<DbId>,
    pub link: Option<String>,
    pub trace_key: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TraceFrameLeafAssoc {
    pub trace_frame_id: DbId,
    pub leaf_id: DbId,
    pub trace_length: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct TraceFrameAnnotationTraceFrameAssoc {
    pub trace_frame_annotation_id: DbId,
    pub trace_frame_id: DbId,
}

#[derive(Debug, Clone, Default)]
pub struct Feature {
    pub id: DbId,
    pub name: String,
}

impl Feature {
    pub fn new(name: impl Into<String>) -> Self {
        Feature {
            id: DbId::new(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IssueInstanceFeatureAssoc {
    pub issue_instance_id: DbId,
    pub feature_id: DbId,
}

/// Any record the bulk saver accepts.
#[derive(Debug, Clone)]
pub enum Record {
    SharedText(SharedText),
    Issue(Issue),
    IssueInstanceFixInfo(IssueInstanceFixInfo),
    IssueInstance(IssueInstance),
    IssueInstanceSharedTextAssoc(IssueInstanceSharedTextAssoc),
    TraceFrame(TraceFrame),
    IssueInstanceTraceFrameAssoc(IssueInstanceTraceFrameAssoc),
    TraceFrameAnnotation(TraceFrameAnnotation),
    TraceFrameLeafAssoc(TraceFrameLeafAssoc),
    TraceFrameAnnotationTraceFrameAssoc(TraceFrameAnnotationTraceFrameAssoc),
    Feature(Feature),
    IssueInstanceFeatureAssoc(IssueInstanceFeatureAssoc),
}

macro_rules! record_variants {
    ($($variant:ident),* $(,)?) => {
        impl Record {
            pub fn kind(&self) -> RecordKind {
                match self {
                    $(Record::$variant(_) => RecordKind::$variant,)*
                }
            }
        }

        $(
            impl From<$variant> for Record {
                fn from(record: $variant) -> Self {
                    Record::$variant(record)
                }
            }
        )*
    };
}

record_variants!(
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
);

impl Record {
    /// The record's own id, for kinds that have one.
    pub fn id(&self) -> Option<&DbId> {
        match self {
            Record::SharedText(r) => Some(&r.id),
            Record::Issue(r) => Some(&r.id),
            Record::IssueInstanceFixInfo(r) => Some(&r.id),
            Record::IssueInstance(r) => Some(&r.id),
            Record::TraceFrame(r) => Some(&r.id),
            Record::TraceFrameAnnotation(r) => Some(&r.id),
            Record::Feature(r) => Some(&r.id),
            Record::IssueInstanceSharedTextAssoc(_)
            | Record::IssueInstanceTraceFrameAssoc(_)
            | Record::TraceFrameLeafAssoc(_)
            | Record::TraceFrameAnnotationTraceFrameAssoc(_)
            | Record::IssueInstanceFeatureAssoc(_) => None,
        }
    }
}
