//! Stored row counts.

use sqlx::SqlitePool;
use strum::IntoEnumIterator;

use crate::error_handling::DatabaseError;
use crate::models::RecordKind;

/// Number of stored rows per kind, in save order.
pub async fn table_counts(pool: &SqlitePool) -> Result<Vec<(RecordKind, i64)>, DatabaseError> {
    let mut counts = Vec::new();
    for kind in RecordKind::iter() {
        let query = format!("SELECT COUNT(*) FROM {}", kind.table_name());
        let count: i64 = sqlx::query_scalar(&query).fetch_one(pool).await?;
        counts.push((kind, count));
    }
    Ok(counts)
}
