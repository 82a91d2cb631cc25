//! Column value types stored as text.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter as EnumIterMacro};

/// What a `SharedText` row holds. Together with the contents it forms the
/// natural key of the row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, EnumIterMacro, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SharedTextKind {
    Feature,
    #[default]
    Message,
    Source,
    Sink,
    Callable,
    Filename,
    SourceDetail,
    SinkDetail,
}

/// Triage status of an issue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, EnumIterMacro, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    #[default]
    Uncategorized,
    BadPractice,
    FalsePositive,
    ValidBug,
    DoNotCare,
}

/// Direction of a trace frame.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, EnumIterMacro, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    #[default]
    Precondition,
    Postcondition,
}

/// A span on one source line, stored as `line|begin|end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: i64,
    pub begin_column: i64,
    pub end_column: i64,
}

impl SourceLocation {
    pub fn new(line: i64, begin_column: i64, end_column: i64) -> Self {
        SourceLocation {
            line,
            begin_column,
            end_column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}|{}", self.line, self.begin_column, self.end_column)
    }
}
