//! The import-run pipeline: Extracting → Cleaning → Mapping → Persisting.
//!
//! One call, one document, one aggregate outcome. Extraction failure aborts
//! the run before any record exists; a mapping failure means the cleaning
//! gate let noise through and also aborts (skipping the row would hide a
//! gap in the gate); a persistence failure surfaces after the sink rolled
//! its transaction back.

use std::path::Path;

use carsales_pdf::{clean, ExtractOptions, PdfExtractor, RawTableBlock};
use carsales_records::{map_row, CarSaleRecord};

use crate::error::{ImportError, Result};
use crate::sink::RecordSink;

/// Counts reported for a committed run, so operators can judge extraction
/// quality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records handed to the sink.
    pub records: usize,
    /// Blocks rejected by the column-count gate.
    pub blocks_rejected: usize,
    /// Rows dropped for empty cells (header rows included).
    pub rows_dropped: usize,
}

/// Mapped records plus the rejection counts accumulated on the way.
#[derive(Debug)]
pub struct MappedRecords {
    pub records: Vec<CarSaleRecord>,
    pub blocks_rejected: usize,
    pub rows_dropped: usize,
}

/// Clean raw blocks and map the surviving rows into records.
pub fn map_blocks(blocks: Vec<RawTableBlock>) -> Result<MappedRecords> {
    let mut records = Vec::new();
    let mut blocks_rejected = 0;
    let mut rows_dropped = 0;

    for block in blocks {
        let rows_before = block.row_count();
        let Some(cleaned) = clean(block) else {
            blocks_rejected += 1;
            continue;
        };
        rows_dropped += rows_before - cleaned.row_count();

        for row in &cleaned.rows {
            records.push(map_row(row)?);
        }
    }

    Ok(MappedRecords {
        records,
        blocks_rejected,
        rows_dropped,
    })
}

/// Run one end-to-end import of a single document into the given sink.
pub fn run_import(
    path: &Path,
    options: ExtractOptions,
    sink: &mut dyn RecordSink,
) -> Result<ImportSummary> {
    tracing::info!(path = %path.display(), "starting import run");

    let blocks = PdfExtractor::new(options).extract(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "extraction failed, run aborted");
        e
    })?;

    let mapped = map_blocks(blocks).map_err(|e| {
        tracing::error!(error = %e, "mapping failed, run aborted");
        e
    })?;

    sink.persist(&mapped.records).map_err(|e| {
        tracing::error!(error = %e, "persistence failed, run rolled back");
        ImportError::Persistence(e)
    })?;

    let summary = ImportSummary {
        records: mapped.records.len(),
        blocks_rejected: mapped.blocks_rejected,
        rows_dropped: mapped.rows_dropped,
    };
    tracing::info!(
        records = summary.records,
        blocks_rejected = summary.blocks_rejected,
        rows_dropped = summary.rows_dropped,
        "import run committed"
    );
    Ok(summary)
}
