//! Error types for the card store and deck import/export.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("deck not found: {0}")]
    DeckNotFound(String),

    #[error("card not found: {0}")]
    CardNotFound(i64),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
