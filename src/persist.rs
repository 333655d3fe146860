use crate::error::Result;
use crate::table::{Table, Value};
use rusqlite::types::{ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::{Connection, ToSql};
use std::path::Path;
use tracing::debug;

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Int(n) => ToSqlOutput::Owned(SqlValue::Integer(*n)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
        })
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// INTEGER when every non-null value in the column is an integer, else TEXT.
fn column_affinity(table: &Table, column: usize) -> &'static str {
    let all_int = table
        .rows()
        .iter()
        .all(|row| matches!(row[column], Value::Int(_) | Value::Null));
    if all_int && !table.is_empty() {
        "INTEGER"
    } else {
        "TEXT"
    }
}

/// Write the table to a named SQLite table, replacing any prior table of
/// that name. The write goes to a staging table which is swapped for the
/// target inside one transaction, so a failed run never leaves a
/// half-written target visible.
pub fn save_table<P: AsRef<Path>>(table: &Table, db_path: P, table_name: &str) -> Result<()> {
    let mut conn = Connection::open(db_path)?;
    let staging = format!("{table_name}__staging");

    let columns: Vec<String> = table
        .headers()
        .iter()
        .enumerate()
        .map(|(i, header)| format!("{} {}", quote_ident(header), column_affinity(table, i)))
        .collect();
    let placeholders: Vec<&str> = vec!["?"; table.headers().len()];

    let tx = conn.transaction()?;
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {};",
        quote_ident(&staging)
    ))?;
    tx.execute_batch(&format!(
        "CREATE TABLE {} ({});",
        quote_ident(&staging),
        columns.join(", ")
    ))?;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {} VALUES ({})",
            quote_ident(&staging),
            placeholders.join(", ")
        ))?;
        for row in table.rows() {
            stmt.execute(rusqlite::params_from_iter(row.iter()))?;
        }
    }
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {};",
        quote_ident(table_name)
    ))?;
    tx.execute_batch(&format!(
        "ALTER TABLE {} RENAME TO {};",
        quote_ident(&staging),
        quote_ident(table_name)
    ))?;
    tx.commit()?;

    debug!("Persisted {} rows to table '{}'", table.height(), table_name);
    Ok(())
}
