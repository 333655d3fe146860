use clap::Parser;
use std::path::PathBuf;
use tracing::error;

use disaster_etl::logging;
use disaster_etl::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "process_data")]
#[command(about = "Disaster response message ETL: join, decode and clean two CSVs into SQLite")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the messages CSV file
    messages_filepath: PathBuf,

    /// Path to the categories CSV file
    categories_filepath: PathBuf,

    /// Path to the SQLite database to save the cleaned data to
    database_filepath: PathBuf,

    /// Name of the destination table
    #[arg(long, default_value = "messages")]
    table: String,
}

fn main() {
    logging::init_logging();

    let cli = Cli::parse();

    match Pipeline::run(
        &cli.messages_filepath,
        &cli.categories_filepath,
        &cli.database_filepath,
        &cli.table,
    ) {
        Ok(result) => {
            println!("Cleaned data saved to database!");
            println!("\n📊 Pipeline summary:");
            println!("   Messages loaded: {}", result.messages_loaded);
            println!("   Category rows loaded: {}", result.categories_loaded);
            println!("   Joined rows: {}", result.rows_joined);
            println!("   Labels decoded: {}", result.labels_decoded);
            println!("   Duplicates dropped: {}", result.duplicates_dropped);
            println!("   Ambiguous rows dropped: {}", result.sentinel_dropped);
            println!("   Rows saved: {}", result.rows_saved);
        }
        Err(e) => {
            error!("Pipeline failed: {}", e);
            eprintln!("❌ Pipeline failed: {e}");
            std::process::exit(1);
        }
    }
}
