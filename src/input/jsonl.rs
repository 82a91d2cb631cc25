//! JSONL record parsing.
//!
//! Lines are parsed in order and references resolve against entities defined
//! on earlier lines, so a file lists parents before the records pointing at
//! them.

use std::collections::HashMap;

use crate::error_handling::InputError;
use crate::models::{
    DbId, Feature, Issue, IssueInstance, IssueInstanceFeatureAssoc, IssueInstanceFixInfo,
    IssueInstanceSharedTextAssoc, IssueInstanceTraceFrameAssoc, Record, RecordKind, SharedText,
    TraceFrame, TraceFrameAnnotation, TraceFrameAnnotationTraceFrameAssoc, TraceFrameLeafAssoc,
};

use super::document::Document;

/// Entity ids by `ref`, with the kind each ref was defined as.
#[derive(Default)]
struct RefTable {
    ids: HashMap<String, (RecordKind, DbId)>,
}

impl RefTable {
    /// Defines `reference` and returns the id for the new entity.
    fn define(
        &mut self,
        line: usize,
        reference: String,
        kind: RecordKind,
    ) -> Result<DbId, InputError> {
        if self.ids.contains_key(&reference) {
            return Err(InputError::DuplicateReference { line, reference });
        }
        let id = DbId::new();
        self.ids.insert(reference, (kind, id.clone()));
        Ok(id)
    }

    fn lookup(
        &self,
        line: usize,
        reference: &str,
        expected: RecordKind,
    ) -> Result<DbId, InputError> {
        match self.ids.get(reference) {
            Some((kind, id)) if *kind == expected => Ok(id.clone()),
            Some((kind, _)) => Err(InputError::WrongKind {
                line,
                reference: reference.to_string(),
                expected,
                found: *kind,
            }),
            None => Err(InputError::UnknownReference {
                line,
                reference: reference.to_string(),
            }),
        }
    }

    fn lookup_opt(
        &self,
        line: usize,
        reference: Option<&str>,
        expected: RecordKind,
    ) -> Result<Option<DbId>, InputError> {
        reference
            .map(|r| self.lookup(line, r, expected))
            .transpose()
    }
}

/// Parses JSONL text into records, in file order.
///
/// Blank lines and lines starting with `#` are skipped. Line numbers in
/// errors are 1-based.
pub fn parse_records(text: &str) -> Result<Vec<Record>, InputError> {
    let mut refs = RefTable::default();
    let mut records = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let document: Document = serde_json::from_str(trimmed)
            .map_err(|source| InputError::Malformed { line, source })?;
        records.push(to_record(&mut refs, line, document)?);
    }

    Ok(records)
}

/// Reads and parses a JSONL file.
pub async fn load_records(path: &std::path::Path) -> Result<Vec<Record>, InputError> {
    let text = tokio::fs::read_to_string(path).await?;
    parse_records(&text)
}

fn to_record(refs: &mut RefTable, line: usize, document: Document) -> Result<Record, InputError> {
    use RecordKind as K;

    let record: Record = match document {
        Document::SharedText {
            reference,
            contents,
            kind,
        } => SharedText {
            id: refs.define(line, reference, K::SharedText)?,
            contents,
            kind,
        }
        .into(),
        Document::Issue {
            reference,
            handle,
            code,
            callable,
            status,
            detected_time,
        } => Issue {
            id: refs.define(line, reference, K::Issue)?,
            handle,
            code,
            callable_id: refs.lookup(line, &callable, K::SharedText)?,
            status,
            detected_time,
        }
        .into(),
        Document::IssueInstanceFixInfo {
            reference,
            fix_info,
        } => IssueInstanceFixInfo {
            id: refs.define(line, reference, K::IssueInstanceFixInfo)?,
            fix_info,
        }
        .into(),
        Document::IssueInstance {
            reference,
            run_id,
            issue,
            location,
            filename,
            callable,
            message,
            is_new_issue,
            fix_info,
            min_trace_length_to_sources,
            min_trace_length_to_sinks,
            callable_count,
        } => IssueInstance {
            id: refs.define(line, reference, K::IssueInstance)?,
            run_id,
            issue_id: refs.lookup(line, &issue, K::Issue)?,
            location,
            filename_id: refs.lookup(line, &filename, K::SharedText)?,
            callable_id: refs.lookup(line, &callable, K::SharedText)?,
            message_id: refs.lookup(line, &message, K::SharedText)?,
            is_new_issue,
            fix_info_id: refs.lookup_opt(line, fix_info.as_deref(), K::IssueInstanceFixInfo)?,
            min_trace_length_to_sources,
            min_trace_length_to_sinks,
            callable_count,
        }
        .into(),
        Document::IssueInstanceSharedTextAssoc {
            issue_instance,
            shared_text,
        } => IssueInstanceSharedTextAssoc {
            issue_instance_id: refs.lookup(line, &issue_instance, K::IssueInstance)?,
            shared_text_id: refs.lookup(line, &shared_text, K::SharedText)?,
        }
        .into(),
        Document::TraceFrame {
            reference,
            kind,
            caller,
            caller_port,
            callee,
            callee_port,
            callee_location,
            filename,
            run_id,
            titos,
            type_interval_lower,
            type_interval_upper,
            preserves_type_context,
        } => TraceFrame {
            id: refs.define(line, reference, K::TraceFrame)?,
            kind,
            caller_id: refs.lookup(line, &caller, K::SharedText)?,
            caller_port,
            callee_id: refs.lookup(line, &callee, K::SharedText)?,
            callee_port,
            callee_location,
            filename_id: refs.lookup(line, &filename, K::SharedText)?,
            run_id,
            titos,
            type_interval_lower,
            type_interval_upper,
            preserves_type_context,
        }
        .into(),
        Document::IssueInstanceTraceFrameAssoc {
            issue_instance,
            trace_frame,
        } => IssueInstanceTraceFrameAssoc {
            issue_instance_id: refs.lookup(line, &issue_instance, K::IssueInstance)?,
            trace_frame_id: refs.lookup(line, &trace_frame, K::TraceFrame)?,
        }
        .into(),
        Document::TraceFrameAnnotation {
            reference,
            trace_frame,
            location,
            kind,
            message,
            leaf,
            link,
            trace_key,
        } => TraceFrameAnnotation {
            id: refs.define(line, reference, K::TraceFrameAnnotation)?,
            trace_frame_id: refs.lookup(line, &trace_frame, K::TraceFrame)?,
            location,
            kind,
            message,
            leaf_id: refs.lookup_opt(line, leaf.as_deref(), K::SharedText)?,
            link,
            trace_key,
        }
        .into(),
        Document::TraceFrameLeafAssoc {
            trace_frame,
            leaf,
            trace_length,
        } => TraceFrameLeafAssoc {
            trace_frame_id: refs.lookup(line, &trace_frame, K::TraceFrame)?,
            leaf_id: refs.lookup(line, &leaf, K::SharedText)?,
            trace_length,
        }
        .into(),
        Document::TraceFrameAnnotationTraceFrameAssoc {
            trace_frame_annotation,
            trace_frame,
        } => TraceFrameAnnotationTraceFrameAssoc {
            trace_frame_annotation_id: refs.lookup(
                line,
                &trace_frame_annotation,
                K::TraceFrameAnnotation,
            )?,
            trace_frame_id: refs.lookup(line, &trace_frame, K::TraceFrame)?,
        }
        .into(),
        Document::Feature { reference, name } => Feature {
            id: refs.define(line, reference, K::Feature)?,
            name,
        }
        .into(),
        Document::IssueInstanceFeatureAssoc {
            issue_instance,
            feature,
        } => IssueInstanceFeatureAssoc {
            issue_instance_id: refs.lookup(line, &issue_instance, K::IssueInstance)?,
            feature_id: refs.lookup(line, &feature, K::Feature)?,
        }
        .into(),
    };
    Ok(record)
}
