//! Column/value rows ready for insertion.

use crate::error_handling::SaveError;
use crate::models::{DbId, RecordKind};

/// A bindable column value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Text(String),
}

/// One row of a table: column names and the values to bind, in matching order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub columns: Vec<&'static str>,
    pub values: Vec<SqlValue>,
}

impl Row {
    #[cfg(test)]
    pub fn value(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .position(|c| *c == column)
            .map(|i| &self.values[i])
    }
}

/// Builds a [`Row`] column by column.
///
/// When `render_nulls` is off, `None` optional values are left out of the row
/// entirely so the column default applies.
pub struct RowBuilder {
    kind: RecordKind,
    render_nulls: bool,
    row: Row,
}

impl RowBuilder {
    pub fn new(kind: RecordKind, render_nulls: bool) -> Self {
        RowBuilder {
            kind,
            render_nulls,
            row: Row {
                columns: Vec::new(),
                values: Vec::new(),
            },
        }
    }

    fn push(mut self, column: &'static str, value: SqlValue) -> Self {
        self.row.columns.push(column);
        self.row.values.push(value);
        self
    }

    fn push_null(self, column: &'static str) -> Self {
        if self.render_nulls {
            self.push(column, SqlValue::Null)
        } else {
            self
        }
    }

    pub fn int(self, column: &'static str, value: i64) -> Self {
        self.push(column, SqlValue::Integer(value))
    }

    pub fn flag(self, column: &'static str, value: bool) -> Self {
        self.push(column, SqlValue::Integer(i64::from(value)))
    }

    pub fn text(self, column: &'static str, value: impl Into<String>) -> Self {
        self.push(column, SqlValue::Text(value.into()))
    }

    pub fn opt_int(self, column: &'static str, value: Option<i64>) -> Self {
        match value {
            Some(v) => self.int(column, v),
            None => self.push_null(column),
        }
    }

    pub fn opt_text(self, column: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.text(column, v),
            None => self.push_null(column),
        }
    }

    /// A mandatory key column; the id must be resolved by now.
    pub fn id(self, column: &'static str, id: &DbId) -> Result<Self, SaveError> {
        match id.get() {
            Some(v) => Ok(self.int(column, v)),
            None => Err(SaveError::UnresolvedReference {
                kind: self.kind,
                column,
            }),
        }
    }

    /// A nullable foreign key. An absent reference is NULL; a present one must
    /// be resolved.
    pub fn opt_id(self, column: &'static str, id: Option<&DbId>) -> Result<Self, SaveError> {
        match id {
            Some(id) => self.id(column, id),
            None => Ok(self.push_null(column)),
        }
    }

    pub fn build(self) -> Row {
        self.row
    }
}
