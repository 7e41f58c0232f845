//! # carsales-pdf
//!
//! Table extraction from PDF documents: lopdf-backed page text extraction
//! over a page selector, whitespace-layout table detection, and the
//! validation/cleaning gate that separates real data tables from the noise
//! PDF extraction produces (misread headers, footers, wrapped cells).

pub mod block;
pub mod detector;
pub mod error;
pub mod extractor;
pub mod pages;

use std::path::Path;

pub use block::{clean, RawTableBlock};
pub use error::{PdfError, Result};
pub use extractor::{ExtractOptions, PdfExtractor};
pub use pages::PageRange;

/// Extract raw table blocks from a PDF file using default options.
pub fn extract_blocks<P: AsRef<Path>>(path: P) -> Result<Vec<RawTableBlock>> {
    extract_blocks_with_options(path, ExtractOptions::default())
}

/// Extract raw table blocks from a PDF file with custom options.
pub fn extract_blocks_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<Vec<RawTableBlock>> {
    PdfExtractor::new(options).extract(path.as_ref())
}
