use crate::error::{EtlError, Result};
use crate::table::{Table, Value};
use tracing::debug;

/// Name of the composite-encoded column in the categories source.
pub const CATEGORIES_COLUMN: &str = "categories";

/// The ordered label names shared by every record in a run.
///
/// The vocabulary is derived once, from the first record's encoding, and then
/// passed explicitly into the decoder; every later record is validated against
/// it instead of being trusted positionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVocabulary {
    labels: Vec<String>,
}

impl LabelVocabulary {
    /// Derive the vocabulary from one encoding string, e.g.
    /// `"related-1;request-0;offer-0"` yields `[related, request, offer]`.
    pub fn derive(encoding: &str) -> Result<Self> {
        let mut labels = Vec::new();
        for token in encoding.split(';') {
            let Some((label, _)) = token.split_once('-') else {
                return Err(EtlError::Decode(format!(
                    "token '{token}' has no '-' separator"
                )));
            };
            labels.push(label.to_string());
        }
        Ok(Self { labels })
    }

    /// Derive the vocabulary from the first record of a joined table.
    /// An empty table has no record to derive a schema from.
    pub fn from_table(table: &Table) -> Result<Self> {
        let categories = table.require_column(CATEGORIES_COLUMN)?;
        let first = table.rows().first().ok_or_else(|| {
            EtlError::Decode("cannot derive label vocabulary from an empty dataset".to_string())
        })?;
        let encoding = first[categories].as_text().ok_or_else(|| {
            EtlError::Decode("first record's categories value is not text".to_string())
        })?;
        Self::derive(encoding)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Replace the composite `categories` column with one integer column per
/// vocabulary label. All other columns pass through unchanged, in order.
///
/// Each record's encoding must carry exactly one token per vocabulary label;
/// a mismatched token count means the encoding drifted from the schema the
/// vocabulary was derived from, and decoding aborts rather than misaligning
/// columns. The decoded value is the final character of each token.
pub fn expand_categories(table: Table, vocabulary: &LabelVocabulary) -> Result<Table> {
    let categories = table.require_column(CATEGORIES_COLUMN)?;

    let mut headers: Vec<String> = table
        .headers()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != categories)
        .map(|(_, h)| h.clone())
        .collect();
    headers.extend(vocabulary.labels().iter().cloned());

    let mut decoded = Table::new(headers);
    for (row_index, row) in table.rows().iter().enumerate() {
        let encoding = row[categories].as_text().ok_or_else(|| {
            EtlError::Decode(format!("row {row_index}: categories value is not text"))
        })?;

        let tokens: Vec<&str> = encoding.split(';').collect();
        if tokens.len() != vocabulary.len() {
            return Err(EtlError::Decode(format!(
                "row {row_index}: expected {} labels, found {} tokens",
                vocabulary.len(),
                tokens.len()
            )));
        }

        let mut out: Vec<Value> = row
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != categories)
            .map(|(_, v)| v.clone())
            .collect();
        for token in tokens {
            let digit = token
                .chars()
                .last()
                .and_then(|c| c.to_digit(10))
                .ok_or_else(|| {
                    EtlError::Decode(format!(
                        "row {row_index}: token '{token}' does not end in a digit"
                    ))
                })?;
            out.push(Value::Int(i64::from(digit)));
        }
        decoded.push_row(out);
    }

    debug!(
        "Decoded {} rows into {} label columns",
        decoded.height(),
        vocabulary.len()
    );
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(encodings: &[&str]) -> Table {
        Table::from_rows(
            vec![
                "id".to_string(),
                "message".to_string(),
                "categories".to_string(),
            ],
            encodings
                .iter()
                .enumerate()
                .map(|(i, enc)| {
                    vec![
                        Value::Int(i as i64 + 1),
                        Value::Text(format!("message {}", i + 1)),
                        Value::Text(enc.to_string()),
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn vocabulary_comes_from_the_first_record() {
        let table = joined(&["related-1;request-0;offer-0", "related-0;request-1;offer-0"]);
        let vocab = LabelVocabulary::from_table(&table).unwrap();
        assert_eq!(vocab.labels(), ["related", "request", "offer"]);
    }

    #[test]
    fn empty_table_cannot_produce_a_vocabulary() {
        let table = joined(&[]);
        let err = LabelVocabulary::from_table(&table).unwrap_err();
        assert!(matches!(err, EtlError::Decode(_)));
    }

    #[test]
    fn token_without_separator_is_malformed() {
        let err = LabelVocabulary::derive("related-1;request").unwrap_err();
        assert!(matches!(err, EtlError::Decode(_)));
    }

    #[test]
    fn well_formed_records_decode_against_the_vocabulary() {
        let table = joined(&["a-1;b-0", "a-0;b-1"]);
        let vocab = LabelVocabulary::from_table(&table).unwrap();
        let decoded = expand_categories(table, &vocab).unwrap();

        assert_eq!(decoded.headers(), ["id", "message", "a", "b"]);
        assert_eq!(decoded.rows()[0][2], Value::Int(1));
        assert_eq!(decoded.rows()[0][3], Value::Int(0));
        assert_eq!(decoded.rows()[1][2], Value::Int(0));
        assert_eq!(decoded.rows()[1][3], Value::Int(1));
    }

    #[test]
    fn passthrough_columns_keep_their_values_and_order() {
        let table = joined(&["related-1;request-0"]);
        let vocab = LabelVocabulary::from_table(&table).unwrap();
        let decoded = expand_categories(table, &vocab).unwrap();

        assert_eq!(decoded.rows()[0][0], Value::Int(1));
        assert_eq!(decoded.rows()[0][1], Value::Text("message 1".to_string()));
    }

    #[test]
    fn sentinel_digit_survives_decoding() {
        let table = joined(&["related-2;request-1"]);
        let vocab = LabelVocabulary::from_table(&table).unwrap();
        let decoded = expand_categories(table, &vocab).unwrap();
        assert_eq!(decoded.rows()[0][2], Value::Int(2));
    }

    #[test]
    fn token_count_mismatch_is_a_decode_error() {
        let table = joined(&["a-1;b-0", "a-1"]);
        let vocab = LabelVocabulary::from_table(&table).unwrap();
        let err = expand_categories(table, &vocab).unwrap_err();
        assert!(matches!(err, EtlError::Decode(msg) if msg.contains("row 1")));
    }

    #[test]
    fn non_digit_trailing_character_is_a_decode_error() {
        let table = joined(&["a-1;b-x"]);
        let vocab = LabelVocabulary::from_table(&table).unwrap();
        let err = expand_categories(table, &vocab).unwrap_err();
        assert!(matches!(err, EtlError::Decode(msg) if msg.contains("b-x")));
    }
}
