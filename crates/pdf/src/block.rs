//! Raw table blocks and the validation/cleaning gate.

use carsales_records::schema::{is_numeric_cell, SCHEMA_WIDTH};

/// An untyped table as detected from page text, before validation.
///
/// Rows all carry the same cell count (the detector pads short rows with
/// empty cells). Blocks live only between detection and cleaning; they are
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTableBlock {
    pub rows: Vec<Vec<String>>,
}

impl RawTableBlock {
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Validate and clean one detected block.
///
/// Blocks narrower than the schema are rejected outright: PDF table
/// detection regularly misreads headers, footers and wrapped cells as
/// spurious narrow tables, and the column-count gate is the discriminator
/// between a data table and that noise. For accepted blocks, a leading
/// header row (recognizable by carrying no numeric cell) and every row with
/// an empty cell are dropped. A partially-read row is treated as corrupt,
/// not guessable.
///
/// An accepted block may come out with zero rows; that is a valid result
/// and simply contributes no records.
#[must_use]
pub fn clean(block: RawTableBlock) -> Option<RawTableBlock> {
    if block.width() < SCHEMA_WIDTH {
        tracing::debug!(width = block.width(), "rejecting narrow block");
        return None;
    }

    let mut rows = block.rows;
    if rows
        .first()
        .is_some_and(|row| !row.iter().any(|cell| is_numeric_cell(cell)))
    {
        rows.remove(0);
    }

    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .filter(|row| {
            let complete = row.iter().all(|cell| !cell.trim().is_empty());
            if !complete {
                tracing::debug!(?row, "dropping row with empty cell");
            }
            complete
        })
        .collect();

    Some(RawTableBlock { rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(rows: &[&[&str]]) -> RawTableBlock {
        RawTableBlock {
            rows: rows
                .iter()
                .map(|r| r.iter().map(ToString::to_string).collect())
                .collect(),
        }
    }

    const HEADER: &[&str] = &[
        "No",
        "Model",
        "Brand and Variant",
        "Transmission",
        "Plate No",
        "Mileage",
        "Color",
        "Selling Price",
    ];

    #[test]
    fn narrow_blocks_are_rejected() {
        let narrow = block(&[&["Page", "2", "of 9"], &["foot", "note", "text"]]);
        assert!(clean(narrow).is_none());
    }

    #[test]
    fn header_row_is_dropped() {
        let cleaned = clean(block(&[
            HEADER,
            &["1", "2014", "Vios", "AT", "ABC-123", "12,345", "Silver", "415,000"],
        ]))
        .unwrap();
        assert_eq!(cleaned.row_count(), 1);
        assert_eq!(cleaned.rows[0][0], "1");
    }

    #[test]
    fn rows_with_empty_cells_are_dropped() {
        let cleaned = clean(block(&[
            &["1", "2014", "Vios", "AT", "ABC-123", "12,345", "Silver", "415,000"],
            &["2", "2016", "City", "MT", "", "8,000", "Red", "390,000"],
            &["3", "2015", "Mirage", "AT", "DEF-456", "  ", "Black", "310,000"],
        ]))
        .unwrap();
        assert_eq!(cleaned.row_count(), 1);
        assert_eq!(cleaned.rows[0][4], "ABC-123");
    }

    #[test]
    fn fully_dropped_block_is_still_accepted() {
        let cleaned = clean(block(&[
            HEADER,
            &["1", "2014", "Vios", "AT", "", "12,345", "Silver", "415,000"],
        ]))
        .unwrap();
        assert_eq!(cleaned.row_count(), 0);
    }
}
