//! Serde shapes of JSONL input lines.

use serde::Deserialize;

use crate::models::{IssueStatus, SharedTextKind, SourceLocation, TraceKind};

/// One input line. Entity lines define a `ref`; every other reference field
/// names the `ref` of an earlier line.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum Document {
    SharedText {
        #[serde(rename = "ref")]
        reference: String,
        contents: String,
        kind: SharedTextKind,
    },
    Issue {
        #[serde(rename = "ref")]
        reference: String,
        handle: String,
        code: i64,
        callable: String,
        #[serde(default)]
        status: IssueStatus,
        #[serde(default)]
        detected_time: i64,
    },
    IssueInstanceFixInfo {
        #[serde(rename = "ref")]
        reference: String,
        fix_info: String,
    },
    IssueInstance {
        #[serde(rename = "ref")]
        reference: String,
        run_id: i64,
        issue: String,
        location: SourceLocation,
        filename: String,
        callable: String,
        message: String,
        #[serde(default)]
        is_new_issue: bool,
        #[serde(default)]
        fix_info: Option<String>,
        #[serde(default)]
        min_trace_length_to_sources: Option<i64>,
        #[serde(default)]
        min_trace_length_to_sinks: Option<i64>,
        #[serde(default)]
        callable_count: i64,
    },
    IssueInstanceSharedTextAssoc {
        issue_instance: String,
        shared_text: String,
    },
    TraceFrame {
        #[serde(rename = "ref")]
        reference: String,
        #[serde(default)]
        kind: TraceKind,
        caller: String,
        caller_port: String,
        callee: String,
        callee_port: String,
        callee_location: SourceLocation,
        filename: String,
        run_id: i64,
        #[serde(default)]
        titos: Vec<SourceLocation>,
        #[serde(default)]
        type_interval_lower: Option<i64>,
        #[serde(default)]
        type_interval_upper: Option<i64>,
        #[serde(default)]
        preserves_type_context: bool,
    },
    IssueInstanceTraceFrameAssoc {
        issue_instance: String,
        trace_frame: String,
    },
    TraceFrameAnnotation {
        #[serde(rename = "ref")]
        reference: String,
        trace_frame: String,
        location: SourceLocation,
        #[serde(default)]
        kind: Option<String>,
        message: String,
        #[serde(default)]
        leaf: Option<String>,
        #[serde(default)]
        link: Option<String>,
        #[serde(default)]
        trace_key: Option<String>,
    },
    TraceFrameLeafAssoc {
        trace_frame: String,
        leaf: String,
        #[serde(default)]
        trace_length: Option<i64>,
    },
    TraceFrameAnnotationTraceFrameAssoc {
        trace_frame_annotation: String,
        trace_frame: String,
    },
    Feature {
        #[serde(rename = "ref")]
        reference: String,
        name: String,
    },
    IssueInstanceFeatureAssoc {
        issue_instance: String,
        feature: String,
    },
}
