//! Record to row conversion.

use crate::error_handling::SaveError;
use crate::models::{Record, SourceLocation};

use super::row::{Row, RowBuilder};

/// Converts a prepared record into the row inserted for it.
///
/// Every id the record holds (its own and its foreign keys) must be resolved.
pub(crate) fn render(record: &Record, render_nulls: bool) -> Result<Row, SaveError> {
    let row = RowBuilder::new(record.kind(), render_nulls);
    let row = match record {
        Record::SharedText(r) => row
            .id("id", &r.id)?
            .text("contents", r.contents.as_str())
            .text("kind", r.kind.as_ref()),
        Record::Issue(r) => row
            .id("id", &r.id)?
            .text("handle", r.handle.as_str())
            .int("code", r.code)
            .id("callable_id", &r.callable_id)?
            .text("status", r.status.as_ref())
            .int("detected_time", r.detected_time),
        Record::IssueInstanceFixInfo(r) => {
            row.id("id", &r.id)?.text("fix_info", r.fix_info.as_str())
        }
        Record::IssueInstance(r) => row
            .id("id", &r.id)?
            .int("run_id", r.run_id)
            .id("issue_id", &r.issue_id)?
            .text("location", r.location.to_string())
            .id("filename_id", &r.filename_id)?
            .id("callable_id", &r.callable_id)?
            .id("message_id", &r.message_id)?
            .flag("is_new_issue", r.is_new_issue)
            .opt_id("fix_info_id", r.fix_info_id.as_ref())?
            .opt_int("min_trace_length_to_sources", r.min_trace_length_to_sources)
            .opt_int("min_trace_length_to_sinks", r.min_trace_length_to_sinks)
            .int("callable_count", r.callable_count),
        Record::IssueInstanceSharedTextAssoc(r) => row
            .id("issue_instance_id", &r.issue_instance_id)?
            .id("shared_text_id", &r.shared_text_id)?,
        Record::TraceFrame(r) => row
            .id("id", &r.id)?
            .text("kind", r.kind.as_ref())
            .id("caller_id", &r.caller_id)?
            .text("caller_port", r.caller_port.as_str())
            .id("callee_id", &r.callee_id)?
            .text("callee_port", r.callee_port.as_str())
            .text("callee_location", r.callee_location.to_string())
            .id("filename_id", &r.filename_id)?
            .int("run_id", r.run_id)
            .text("titos", join_locations(&r.titos))
            .opt_int("type_interval_lower", r.type_interval_lower)
            .opt_int("type_interval_upper", r.type_interval_upper)
            .flag("preserves_type_context", r.preserves_type_context),
        Record::IssueInstanceTraceFrameAssoc(r) => row
            .id("issue_instance_id", &r.issue_instance_id)?
            .id("trace_frame_id", &r.trace_frame_id)?,
        Record::TraceFrameAnnotation(r) => row
            .id("id", &r.id)?
            .id("trace_frame_id", &r.trace_frame_id)?
            .text("location", r.location.to_string())
            .opt_text("kind", r.kind.as_deref())
            .text("message", r.message.as_str())
            .opt_id("leaf_id", r.leaf_id.as_ref())?
            .opt_text("link", r.link.as_deref())
            .opt_text("trace_key", r.trace_key.as_deref()),
        Record::TraceFrameLeafAssoc(r) => row
            .id("trace_frame_id", &r.trace_frame_id)?
            .id("leaf_id", &r.leaf_id)?
            .opt_int("trace_length", r.trace_length),
        Record::TraceFrameAnnotationTraceFrameAssoc(r) => row
            .id("trace_frame_annotation_id", &r.trace_frame_annotation_id)?
            .id("trace_frame_id", &r.trace_frame_id)?,
        Record::Feature(r) => row.id("id", &r.id)?.text("name", r.name.as_str()),
        Record::IssueInstanceFeatureAssoc(r) => row
            .id("issue_instance_id", &r.issue_instance_id)?
            .id("feature_id", &r.feature_id)?,
    };
    Ok(row.build())
}

/// Taint-in-taint-out locations, `;`-separated.
fn join_locations(locations: &[SourceLocation]) -> String {
    locations
        .iter()
        .map(SourceLocation::to_string)
        .collect::<Vec<_>>()
        .join(";")
}
