use crate::decode::LabelVocabulary;
use crate::error::Result;
use crate::table::Table;
use crate::{decode, join, persist, reader, sanitize};
use std::path::Path;
use tracing::{info, instrument};

/// Row-count summary of a completed pipeline run.
#[derive(Debug)]
pub struct PipelineResult {
    pub messages_loaded: usize,
    pub categories_loaded: usize,
    pub rows_joined: usize,
    pub labels_decoded: usize,
    pub duplicates_dropped: usize,
    pub sentinel_dropped: usize,
    pub rows_saved: usize,
}

pub struct Pipeline;

impl Pipeline {
    /// Run the full batch: load both sources, join on `id`, decode the
    /// category encoding, sanitize, and persist. Strictly sequential; any
    /// stage error aborts the run before the next stage begins.
    #[instrument(skip_all, fields(table = %table_name))]
    pub fn run(
        messages_path: impl AsRef<Path>,
        categories_path: impl AsRef<Path>,
        db_path: impl AsRef<Path>,
        table_name: &str,
    ) -> Result<PipelineResult> {
        info!("📥 Loading data...");
        println!(
            "Loading data...\n    MESSAGES: {}\n    CATEGORIES: {}",
            messages_path.as_ref().display(),
            categories_path.as_ref().display()
        );
        let messages = reader::load_table(&messages_path)?;
        let categories = reader::load_table(&categories_path)?;
        let messages_loaded = messages.height();
        let categories_loaded = categories.height();
        info!(
            "✅ Loaded {} messages and {} category rows",
            messages_loaded, categories_loaded
        );

        info!("🔧 Cleaning data...");
        println!("Cleaning data...");
        let cleaned = Self::clean(join::inner_join(&messages, &categories, "id")?)?;
        let rows_joined = cleaned.rows_joined;
        let labels_decoded = cleaned.labels_decoded;
        let duplicates_dropped = cleaned.duplicates_dropped;
        let sentinel_dropped = cleaned.sentinel_dropped;
        let table = cleaned.table;
        info!(
            "✅ Cleaned {} joined rows into {} ({} duplicates, {} sentinel rows dropped)",
            rows_joined,
            table.height(),
            duplicates_dropped,
            sentinel_dropped
        );

        info!("💾 Saving data...");
        println!(
            "Saving data...\n    DATABASE: {}",
            db_path.as_ref().display()
        );
        persist::save_table(&table, &db_path, table_name)?;
        info!("✅ Saved {} rows to table '{}'", table.height(), table_name);

        Ok(PipelineResult {
            messages_loaded,
            categories_loaded,
            rows_joined,
            labels_decoded,
            duplicates_dropped,
            sentinel_dropped,
            rows_saved: table.height(),
        })
    }

    /// Decode and sanitize one joined table.
    fn clean(joined: Table) -> Result<CleanOutcome> {
        let rows_joined = joined.height();
        let vocabulary = LabelVocabulary::from_table(&joined)?;
        let decoded = decode::expand_categories(joined, &vocabulary)?;

        let deduped = sanitize::drop_duplicates(decoded);
        let after_dedup = deduped.height();
        let table = sanitize::drop_sentinel_rows(deduped);

        Ok(CleanOutcome {
            duplicates_dropped: rows_joined - after_dedup,
            sentinel_dropped: after_dedup - table.height(),
            labels_decoded: vocabulary.len(),
            rows_joined,
            table,
        })
    }
}

struct CleanOutcome {
    table: Table,
    rows_joined: usize,
    labels_decoded: usize,
    duplicates_dropped: usize,
    sentinel_dropped: usize,
}
