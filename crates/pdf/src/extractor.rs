use std::path::Path;

use lopdf::Document;

use crate::detector::TableDetector;
use crate::error::{PdfError, Result};
use crate::pages::PageRange;
use crate::RawTableBlock;

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub pages: PageRange,
    pub min_table_rows: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            pages: PageRange::All,
            min_table_rows: 2,
        }
    }
}

pub struct PdfExtractor {
    options: ExtractOptions,
    detector: TableDetector,
}

impl PdfExtractor {
    #[must_use]
    pub fn new(options: ExtractOptions) -> Self {
        let detector = TableDetector::new(options.min_table_rows);
        Self { options, detector }
    }

    /// Extract every raw table block from the selected pages.
    ///
    /// Fails when the document cannot be loaded, the page range does not fit
    /// the document, or no selected page yields any text. A document that
    /// loads fine but contains no tables is an empty result, not an error.
    pub fn extract(&self, path: &Path) -> Result<Vec<RawTableBlock>> {
        let doc = Document::load(path)
            .map_err(|e| PdfError::Load(format!("{}: {e}", path.display())))?;

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::Extract("document has no pages".to_string()));
        }
        let selected = self.options.pages.resolve(page_count)?;

        let mut all_text = String::new();
        let mut any_page_extracted = false;
        let mut last_error: Option<String> = None;

        for page_num in selected {
            match doc.extract_text(&[page_num]) {
                Ok(content) => {
                    any_page_extracted = true;
                    all_text.push_str(&content);
                    all_text.push('\n');
                }
                Err(e) => {
                    last_error = Some(e.to_string());
                    tracing::warn!("text extraction failed on page {}: {}", page_num, e);
                }
            }
        }

        if !any_page_extracted {
            let error_suffix = last_error
                .as_ref()
                .map(|e| format!(": {e}"))
                .unwrap_or_default();
            return Err(PdfError::Extract(format!(
                "no page yielded any text{error_suffix}"
            )));
        }

        Ok(self.detector.detect(&all_text))
    }
}
