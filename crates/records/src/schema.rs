//! The fixed table schema shared by the cleaning gate and the mapper.
//!
//! Source documents carry exactly these eight columns, in this order. The
//! mapper binds cells to fields positionally, so this array is the single
//! source of truth for column order, naming and coercion rules.

use crate::error::{RecordError, Result};

/// How a column's text is coerced into a typed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Plain integer, possibly comma-grouped (`"12,345"`).
    Int,
    /// Free text, trimmed.
    Text,
    /// Integer with a dash sentinel meaning "unknown".
    Mileage,
    /// Decimal, possibly comma-grouped. Fractional prices occur in the wild.
    Price,
}

/// One column of the source table.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Field name, identical to the JSON key the record serializes under.
    pub name: &'static str,
    pub kind: ColumnKind,
}

/// Column order as it appears in the source documents:
/// No, Model, BrandAndVariant, Transmission, PlateNo, Mileage, Color, SellingPrice.
pub const COLUMNS: [Column; 8] = [
    Column { name: "id", kind: ColumnKind::Int },
    Column { name: "model", kind: ColumnKind::Int },
    Column { name: "brand", kind: ColumnKind::Text },
    Column { name: "transmission", kind: ColumnKind::Text },
    Column { name: "plate_no", kind: ColumnKind::Text },
    Column { name: "mileage", kind: ColumnKind::Mileage },
    Column { name: "color", kind: ColumnKind::Text },
    Column { name: "price", kind: ColumnKind::Price },
];

/// Minimum column count a raw block must have to be considered a data table.
pub const SCHEMA_WIDTH: usize = COLUMNS.len();

/// Check a name against the fixed column allowlist.
#[must_use]
pub fn is_column(name: &str) -> bool {
    COLUMNS.iter().any(|c| c.name == name)
}

/// True when the cell parses as a number after stripping thousands
/// separators. Used to recognize header rows, which carry no numeric cell.
#[must_use]
pub fn is_numeric_cell(cell: &str) -> bool {
    let stripped = strip_grouping(cell);
    stripped.parse::<i64>().is_ok() || stripped.parse::<f64>().is_ok()
}

/// Sentinel spellings for an unknown numeric value.
const UNKNOWN_SENTINELS: [&str; 2] = ["-", "\u{2013}"];

fn strip_grouping(raw: &str) -> String {
    raw.trim().replace(',', "")
}

/// Parse a comma-grouped integer cell.
pub fn parse_int(column: &'static str, raw: &str) -> Result<i64> {
    strip_grouping(raw)
        .parse()
        .map_err(|_| RecordError::FieldFormat {
            column,
            value: raw.trim().to_string(),
            kind: "integer",
        })
}

/// Parse a mileage cell: a lone dash means unknown, everything else must be
/// a comma-grouped integer.
pub fn parse_mileage(column: &'static str, raw: &str) -> Result<Option<i64>> {
    if UNKNOWN_SENTINELS.contains(&raw.trim()) {
        return Ok(None);
    }
    parse_int(column, raw).map(Some)
}

/// Parse a comma-grouped price cell, keeping fractional precision.
pub fn parse_price(column: &'static str, raw: &str) -> Result<f64> {
    strip_grouping(raw)
        .parse()
        .map_err(|_| RecordError::FieldFormat {
            column,
            value: raw.trim().to_string(),
            kind: "decimal",
        })
}
