//! # carsales-records
//!
//! The canonical record model for car-sale listings, plus everything that
//! only needs the records themselves: the fixed column schema, positional
//! row-to-record mapping with numeric coercion, and the filter/sort/page
//! query logic consumed by the HTTP façade.
//!
//! This crate is pure: no I/O, no store, no PDF handling.

pub mod error;
pub mod mapper;
pub mod query;
pub mod record;
pub mod schema;

pub use error::{RecordError, Result};
pub use mapper::map_row;
pub use record::CarSaleRecord;
pub use schema::{Column, ColumnKind, COLUMNS, SCHEMA_WIDTH};
