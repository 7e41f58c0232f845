use thiserror::Error;

/// Persistence failures. Any error during an upsert run means the whole
/// transaction was rolled back.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
