//! Positional row-to-record binding.
//!
//! The mapper is only ever handed rows that survived cleaning, so every cell
//! is populated; what can still go wrong is an unparseable numeric cell,
//! which means the cleaning gate let noise through and the whole import run
//! should stop rather than skip the row.

use crate::error::{RecordError, Result};
use crate::record::CarSaleRecord;
use crate::schema::{self, COLUMNS, SCHEMA_WIDTH};

/// Map one cleaned row into a typed record.
///
/// Binding is strictly positional against [`COLUMNS`]; a source document
/// that reorders its columns will produce wrong records, not an error.
pub fn map_row(row: &[String]) -> Result<CarSaleRecord> {
    if row.len() != SCHEMA_WIDTH {
        return Err(RecordError::RowWidth {
            expected: SCHEMA_WIDTH,
            actual: row.len(),
        });
    }

    Ok(CarSaleRecord {
        id: schema::parse_int(COLUMNS[0].name, &row[0])?,
        model: schema::parse_int(COLUMNS[1].name, &row[1])?,
        brand: row[2].trim().to_string(),
        transmission: row[3].trim().to_string(),
        plate_no: row[4].trim().to_string(),
        mileage: schema::parse_mileage(COLUMNS[5].name, &row[5])?,
        color: row[6].trim().to_string(),
        price: schema::parse_price(COLUMNS[7].name, &row[7])?,
    })
}
