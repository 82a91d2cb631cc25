//! Multi-row inserts.

use log::trace;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::config::MAX_BIND_PARAMS;

use super::row::{Row, SqlValue};

/// Inserts `rows` into `table` and returns the number of statements issued.
///
/// Each run of consecutive rows with the same column list becomes one or more
/// `INSERT ... VALUES (...), (...)` statements, split so that no statement
/// binds more than `MAX_BIND_PARAMS` values. Callers sort rows by column list
/// first so that runs are as long as possible.
pub(crate) async fn insert_rows(
    conn: &mut SqliteConnection,
    table: &str,
    rows: &[Row],
) -> Result<usize, sqlx::Error> {
    let mut statements = 0;

    for run in rows.chunk_by(|a, b| a.columns == b.columns) {
        let columns = &run[0].columns;
        let rows_per_statement = (MAX_BIND_PARAMS / columns.len().max(1)).max(1);

        for batch in run.chunks(rows_per_statement) {
            let mut query = QueryBuilder::<Sqlite>::new(format!(
                "INSERT INTO {} ({}) ",
                table,
                columns.join(", ")
            ));
            query.push_values(batch, |mut tuple, row| {
                for value in &row.values {
                    match value {
                        SqlValue::Null => tuple.push_bind(None::<i64>),
                        SqlValue::Integer(v) => tuple.push_bind(*v),
                        SqlValue::Text(s) => tuple.push_bind(s.clone()),
                    };
                }
            });

            query.build().execute(&mut *conn).await?;
            statements += 1;
            trace!("Inserted {} rows into {}", batch.len(), table);
        }
    }

    Ok(statements)
}
