//! # carsales-import
//!
//! Orchestration of one import run: extract tables from a document, clean
//! and map them into records, and hand the result to a record sink (JSON
//! export file or the SQLite keyed store).

pub mod error;
pub mod pipeline;
pub mod sink;

pub use error::{ImportError, Result, SinkError};
pub use pipeline::{map_blocks, run_import, ImportSummary, MappedRecords};
pub use sink::{JsonSink, RecordSink, StoreSink};
