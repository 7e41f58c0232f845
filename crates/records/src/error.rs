use thiserror::Error;

/// Errors that can occur while mapping a raw row into a record
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("row has {actual} cells, schema expects {expected}")]
    RowWidth { expected: usize, actual: usize },

    #[error("column '{column}': cannot parse '{value}' as {kind}")]
    FieldFormat {
        column: &'static str,
        value: String,
        kind: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, RecordError>;
