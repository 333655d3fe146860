use crate::error::Result;
use crate::table::{Table, Value};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

/// Load a delimited file with a header row into an in-memory table,
/// preserving file order. The header fields become the table's columns.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(&path)?;

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut table = Table::new(headers);

    for record in rdr.records() {
        let record = record?;
        let row: Vec<Value> = record.iter().map(Value::parse).collect();
        table.push_row(row);
    }

    debug!(
        "Loaded {} rows from {}",
        table.height(),
        path.as_ref().display()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EtlError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_headers_and_rows_in_file_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id,message,original,genre").unwrap();
        writeln!(file, "1,Weather update,,direct").unwrap();
        writeln!(file, "2,Is the hurricane over,Cyclone nan fini,direct").unwrap();

        let table = load_table(file.path()).unwrap();
        assert_eq!(table.headers(), ["id", "message", "original", "genre"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.rows()[0][0], Value::Int(1));
        assert_eq!(table.rows()[0][1], Value::Text("Weather update".to_string()));
        assert_eq!(table.rows()[0][2], Value::Null);
        assert_eq!(table.rows()[1][3], Value::Text("direct".to_string()));
    }

    #[test]
    fn missing_file_is_a_source_read_error() {
        let err = load_table("/nonexistent/messages.csv").unwrap_err();
        assert!(matches!(err, EtlError::SourceRead(_)));
    }

    #[test]
    fn ragged_rows_are_a_source_read_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id,message").unwrap();
        writeln!(file, "1,hello,extra-field").unwrap();

        let err = load_table(file.path()).unwrap_err();
        assert!(matches!(err, EtlError::SourceRead(_)));
    }
}
