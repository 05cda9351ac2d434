//! Scoped SQL execution against a local SQLite database file.
//!
//! One connection per statement: opened by path, queried with driver-supplied
//! SQL text, closed before returning. Nothing is held across batch iterations.

use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{Column, Connection, Row, SqliteConnection, TypeInfo, ValueRef};
use std::path::Path;
use tracing::debug;

/// Executes one SQL statement and returns the result rows as ordered
/// column-name→value mappings. An empty row set is a successful result.
pub async fn execute_query(
    db_path: &Path,
    sql: &str,
) -> Result<Vec<Map<String, Value>>, sqlx::Error> {
    let options = SqliteConnectOptions::new().filename(db_path);
    let mut conn = SqliteConnection::connect_with(&options).await?;

    let rows = sqlx::query(sql).fetch_all(&mut conn).await?;
    debug!("query returned {} row(s)", rows.len());

    let mut results = Vec::with_capacity(rows.len());
    for row in &rows {
        results.push(row_to_map(row)?);
    }

    conn.close().await?;
    Ok(results)
}

fn row_to_map(row: &SqliteRow) -> Result<Map<String, Value>, sqlx::Error> {
    let mut map = Map::new();
    for (index, column) in row.columns().iter().enumerate() {
        map.insert(column.name().to_string(), column_to_value(row, index)?);
    }
    Ok(map)
}

/// Decodes one column by its runtime SQLite type. BLOB columns are reported
/// as null; none of the validation queries select binary data.
fn column_to_value(row: &SqliteRow, index: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let value = match raw.type_info().name() {
        "INTEGER" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(index)?),
        "REAL" => Value::from(row.try_get::<f64, _>(index)?),
        "BLOB" => Value::Null,
        _ => Value::from(row.try_get::<String, _>(index)?),
    };
    Ok(value)
}
