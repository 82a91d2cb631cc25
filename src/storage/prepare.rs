//! Turning pending records into rows.
//!
//! Preparation assigns reserved keys to records that don't have one yet and
//! merges records of kinds with a natural key into rows that already exist,
//! either in the store or earlier in the same batch.

use std::collections::{HashMap, HashSet};

use log::debug;
use sqlx::{QueryBuilder, Row as _, Sqlite, SqlitePool};

use crate::config::MAX_BIND_PARAMS;
use crate::error_handling::SaveError;
use crate::models::{DbId, Record, RecordKind};

use super::keys::PrimaryKeyGenerator;
use super::render::render;
use super::row::Row;

/// Rows to insert for one kind.
#[derive(Debug, Default)]
pub(crate) struct Prepared {
    pub rows: Vec<Row>,
    /// Records that resolved to an existing row instead of producing one.
    pub merged: usize,
}

/// Natural key of a mergeable record: a discriminator (the shared text kind,
/// empty otherwise) and the unique value.
type NaturalKey = (String, String);

fn natural_key(record: &Record) -> Option<NaturalKey> {
    match record {
        Record::SharedText(r) => Some((r.kind.as_ref().to_string(), r.contents.clone())),
        Record::Issue(r) => Some((String::new(), r.handle.clone())),
        Record::Feature(r) => Some((String::new(), r.name.clone())),
        _ => None,
    }
}

/// Whether records of `kind` are deduplicated by natural key.
pub(crate) fn is_mergeable(kind: RecordKind) -> bool {
    matches!(
        kind,
        RecordKind::SharedText | RecordKind::Issue | RecordKind::Feature
    )
}

/// Assigns ids, merges duplicates and renders rows for `records` of `kind`.
pub(crate) async fn prepare<G>(
    pool: &SqlitePool,
    kind: RecordKind,
    records: Vec<Record>,
    keys: &mut G,
    render_nulls: bool,
) -> Result<Prepared, SaveError>
where
    G: PrimaryKeyGenerator + ?Sized,
{
    let existing = if is_mergeable(kind) {
        fetch_existing(pool, kind, &records).await?
    } else {
        HashMap::new()
    };

    let mut prepared = Prepared::default();
    let mut first_seen: HashMap<NaturalKey, i64> = HashMap::new();

    for record in &records {
        let key = natural_key(record);

        if let Some(key) = &key {
            let target = existing.get(key).or_else(|| first_seen.get(key)).copied();
            if let Some(target) = target {
                if let Some(id) = record.id() {
                    merge_into(kind, id, target)?;
                }
                prepared.merged += 1;
                continue;
            }
        }

        if let Some(id) = record.id() {
            let assigned = match id.get() {
                Some(explicit) => explicit,
                None => {
                    let next = keys.next_id(kind)?;
                    merge_into(kind, id, next)?
                }
            };
            if let Some(key) = key {
                first_seen.insert(key, assigned);
            }
        }

        prepared.rows.push(render(record, render_nulls)?);
    }

    debug!(
        "Prepared {} {} rows ({} merged)",
        prepared.rows.len(),
        kind,
        prepared.merged
    );
    Ok(prepared)
}

fn merge_into(kind: RecordKind, id: &DbId, target: i64) -> Result<i64, SaveError> {
    id.resolve(target)
        .map_err(|assigned| SaveError::ConflictingId {
            kind,
            assigned,
            existing: target,
        })
}

/// Looks up stored rows sharing a natural key with any of `records`.
async fn fetch_existing(
    pool: &SqlitePool,
    kind: RecordKind,
    records: &[Record],
) -> Result<HashMap<NaturalKey, i64>, SaveError> {
    let (select, value_column) = match kind {
        RecordKind::SharedText => ("SELECT id, kind, contents FROM shared_texts", "contents"),
        RecordKind::Issue => ("SELECT id, '' AS kind, handle FROM issues", "handle"),
        RecordKind::Feature => ("SELECT id, '' AS kind, name FROM features", "name"),
        _ => return Ok(HashMap::new()),
    };

    let values: Vec<String> = records
        .iter()
        .filter_map(natural_key)
        .map(|(_, value)| value)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let mut existing = HashMap::new();
    for chunk in values.chunks(MAX_BIND_PARAMS) {
        let mut query = QueryBuilder::<Sqlite>::new(select);
        query.push(format!(" WHERE {} IN (", value_column));
        let mut separated = query.separated(", ");
        for value in chunk {
            separated.push_bind(value.as_str());
        }
        separated.push_unseparated(")");

        for row in query.build().fetch_all(pool).await? {
            let id: i64 = row.try_get(0)?;
            let discriminator: String = row.try_get(1)?;
            let value: String = row.try_get(2)?;
            existing.insert((discriminator, value), id);
        }
    }

    if !existing.is_empty() {
        debug!("Found {} existing {} rows", existing.len(), kind);
    }
    Ok(existing)
}
