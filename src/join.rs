use crate::error::Result;
use crate::table::{Table, Value};
use std::collections::HashMap;
use tracing::debug;

/// Inner join of two tables on a shared key column.
///
/// Output columns are the left table's columns followed by the right table's
/// non-key columns. Row order follows the left table; a key matching k right
/// rows yields k output rows (in right-table order). Keys present in only one
/// input are dropped silently.
pub fn inner_join(left: &Table, right: &Table, key: &str) -> Result<Table> {
    let left_key = left.require_column(key)?;
    let right_key = right.require_column(key)?;

    let mut headers: Vec<String> = left.headers().to_vec();
    for (i, header) in right.headers().iter().enumerate() {
        if i != right_key {
            headers.push(header.clone());
        }
    }

    // Index right rows by key value, preserving right-table order per key.
    let mut by_key: HashMap<&Value, Vec<usize>> = HashMap::new();
    for (i, row) in right.rows().iter().enumerate() {
        by_key.entry(&row[right_key]).or_default().push(i);
    }

    let mut joined = Table::new(headers);
    for left_row in left.rows() {
        let Some(matches) = by_key.get(&left_row[left_key]) else {
            continue;
        };
        for &right_index in matches {
            let mut row = left_row.clone();
            for (i, value) in right.rows()[right_index].iter().enumerate() {
                if i != right_key {
                    row.push(value.clone());
                }
            }
            joined.push_row(row);
        }
    }

    debug!(
        "Joined {} x {} rows into {} on '{}'",
        left.height(),
        right.height(),
        joined.height(),
        key
    );
    Ok(joined)
}
