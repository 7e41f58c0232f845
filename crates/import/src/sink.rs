//! Record sinks: where a finished import run's records go.
//!
//! Two interchangeable sinks, chosen by the caller at startup: a JSON file
//! export and the SQLite keyed store. The store sink borrows a live store
//! handle rather than owning a connection, so the caller controls the
//! connection's lifetime and one store can serve several runs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use carsales_records::CarSaleRecord;
use carsales_store::CarStore;

use crate::error::SinkError;

pub trait RecordSink {
    /// Persist the full ordered record set of one import run.
    fn persist(&mut self, records: &[CarSaleRecord]) -> Result<usize, SinkError>;
}

/// Serializes records to a UTF-8 JSON array with 4-space indentation,
/// overwriting any existing file at the path.
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for JsonSink {
    fn persist(&mut self, records: &[CarSaleRecord]) -> Result<usize, SinkError> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);

        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        records.serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        tracing::info!(records = records.len(), path = %self.path.display(), "wrote JSON export");
        Ok(records.len())
    }
}

/// Upserts records into the keyed store, one transaction per run.
pub struct StoreSink<'a> {
    store: &'a mut CarStore,
}

impl<'a> StoreSink<'a> {
    #[must_use]
    pub fn new(store: &'a mut CarStore) -> Self {
        Self { store }
    }
}

impl RecordSink for StoreSink<'_> {
    fn persist(&mut self, records: &[CarSaleRecord]) -> Result<usize, SinkError> {
        Ok(self.store.upsert_all(records)?)
    }
}
