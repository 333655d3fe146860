use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Failed to read source file: {0}")]
    SourceRead(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    Schema(String),

    #[error("Malformed category encoding: {0}")]
    Decode(String),

    #[error("Database write failed: {0}")]
    Persist(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EtlError>;
