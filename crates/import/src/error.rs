use thiserror::Error;

use carsales_pdf::PdfError;
use carsales_records::RecordError;
use carsales_store::StoreError;

/// Failure inside a record sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write JSON export: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why an import run ended without committing.
///
/// `Extraction` and `Mapping` abort the run before the sink is touched;
/// `Persistence` means the sink's transaction was rolled back.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("extraction failed: {0}")]
    Extraction(#[from] PdfError),

    #[error("mapping failed: {0}")]
    Mapping(#[from] RecordError),

    #[error("persistence failed: {0}")]
    Persistence(#[from] SinkError),
}

pub type Result<T> = std::result::Result<T, ImportError>;
