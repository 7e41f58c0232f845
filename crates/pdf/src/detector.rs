//! Text-table detection over extracted page text.
//!
//! Works on the whitespace layout that PDF text extraction preserves: cells
//! are separated by runs of two or more spaces, tabs, or pipes, and a table
//! is a run of consecutive lines with a stable cell count.

use lazy_static::lazy_static;
use regex::Regex;

use crate::block::RawTableBlock;

lazy_static! {
    // Column separator patterns
    static ref COLUMN_SEPARATOR: Regex = Regex::new(r"(\s{2,}|\t+|\|)+").unwrap();

    // Row patterns
    static ref HORIZONTAL_RULE: Regex = Regex::new(r"^[-=_]{3,}$").unwrap();
}

pub struct TableDetector {
    min_rows: usize,
}

impl Default for TableDetector {
    fn default() -> Self {
        Self { min_rows: 2 }
    }
}

impl TableDetector {
    #[must_use]
    pub fn new(min_rows: usize) -> Self {
        Self { min_rows }
    }

    /// Scan the text and return every detected table block.
    #[must_use]
    pub fn detect(&self, text: &str) -> Vec<RawTableBlock> {
        let lines: Vec<&str> = text.lines().collect();
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            if let Some((block, end)) = self.block_at(&lines, i) {
                i = end + 1;
                blocks.push(block);
            } else {
                i += 1;
            }
        }

        blocks
    }

    /// Try to grow a table block starting at `start`. The first parseable
    /// row fixes the block's column count; later rows with fewer cells are
    /// padded with empty cells so the cleaner can judge them, while a wider
    /// row ends the block.
    fn block_at(&self, lines: &[&str], start: usize) -> Option<(RawTableBlock, usize)> {
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut width = None;
        let mut end = start;

        for (idx, line) in lines.iter().enumerate().skip(start) {
            let line = line.trim();

            if line.is_empty() {
                if rows.is_empty() {
                    continue;
                }
                break;
            }

            if HORIZONTAL_RULE.is_match(line) {
                continue;
            }

            match split_row(line) {
                Some(mut cells) => match width {
                    None => {
                        width = Some(cells.len());
                        rows.push(cells);
                        end = idx;
                    }
                    Some(w) if cells.len() > w => break,
                    Some(w) => {
                        cells.resize(w, String::new());
                        rows.push(cells);
                        end = idx;
                    }
                },
                None => break,
            }
        }

        if rows.len() >= self.min_rows {
            Some((RawTableBlock { rows }, end))
        } else {
            None
        }
    }
}

/// Split one line into cells. Lines with fewer than two cells are not table
/// rows.
fn split_row(line: &str) -> Option<Vec<String>> {
    let cells: Vec<String> = COLUMN_SEPARATOR
        .split(line)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect();

    if cells.len() >= 2 {
        Some(cells)
    } else {
        None
    }
}
