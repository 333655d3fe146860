use crate::table::{Table, Value};
use std::collections::HashSet;
use tracing::debug;

/// Label whose sentinel value marks an ambiguous classification.
pub const RELATED_LABEL: &str = "related";

/// Out-of-domain value meaning unknown/ambiguous; such rows are dropped.
pub const RELATED_SENTINEL: i64 = 2;

/// Drop rows whose full set of column values exactly matches an earlier row.
/// The first occurrence is kept; row order is otherwise preserved.
pub fn drop_duplicates(table: Table) -> Table {
    let headers = table.headers().to_vec();
    let mut seen: HashSet<Vec<Value>> = HashSet::new();
    let mut rows = Vec::new();
    for row in table.rows() {
        if seen.insert(row.clone()) {
            rows.push(row.clone());
        }
    }
    Table::from_rows(headers, rows)
}

/// Drop rows carrying the ambiguity sentinel in the `related` label.
/// A table without that label keeps every row.
pub fn drop_sentinel_rows(table: Table) -> Table {
    let Some(related) = table.column_index(RELATED_LABEL) else {
        return table;
    };
    let headers = table.headers().to_vec();
    let rows = table
        .rows()
        .iter()
        .filter(|row| row[related] != Value::Int(RELATED_SENTINEL))
        .cloned()
        .collect();
    Table::from_rows(headers, rows)
}

/// Enforce the cleaned-dataset invariants: duplicates first, then the
/// sentinel filter. The order matters — filtering first could leave a
/// duplicate pair intact whose kept member was the sentinel row.
pub fn sanitize(table: Table) -> Table {
    let before = table.height();
    let deduped = drop_duplicates(table);
    let after_dedup = deduped.height();
    let cleaned = drop_sentinel_rows(deduped);
    debug!(
        "Sanitized {} rows: {} duplicates, {} sentinel rows dropped",
        before,
        before - after_dedup,
        after_dedup - cleaned.height()
    );
    cleaned
}
