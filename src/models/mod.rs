//! In-memory records produced by an analysis run.
//!
//! - `kind`: the record kinds and their fixed save order
//! - `id`: lazily resolved primary keys shared between records
//! - `values`: enums and locations stored as text columns
//! - `records`: one struct per table and the `Record` enum over them

mod id;
mod kind;
mod records;
mod values;

pub use id::DbId;
pub use kind::RecordKind;
pub use records::{
    Feature, Issue, IssueInstance, IssueInstanceFeatureAssoc, IssueInstanceFixInfo,
    IssueInstanceSharedTextAssoc, IssueInstanceTraceFrameAssoc, Record, SharedText, TraceFrame,
    TraceFrameAnnotation, TraceFrameAnnotationTraceFrameAssoc, TraceFrameLeafAssoc,
};
pub use values::{IssueStatus, SharedTextKind, SourceLocation, TraceKind};
