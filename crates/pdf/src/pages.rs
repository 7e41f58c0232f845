//! Page selectors for an extraction run.

use std::str::FromStr;

use crate::error::{PdfError, Result};

/// Which pages of the document to scan for tables.
///
/// Parsed from the CLI's `--pages` flag: `all`, `N-` (from page N to the
/// end), `N-M`, or a comma-separated list of page numbers. Page numbers are
/// 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageRange {
    #[default]
    All,
    From(usize),
    Span(usize, usize),
    List(Vec<usize>),
}

impl FromStr for PageRange {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PdfError::InvalidPageRange("empty selector".to_string()));
        }
        if s.eq_ignore_ascii_case("all") {
            return Ok(PageRange::All);
        }
        if s.contains(',') {
            let pages = s
                .split(',')
                .map(|part| parse_page(part.trim()))
                .collect::<Result<Vec<usize>>>()?;
            return Ok(PageRange::List(pages));
        }
        if let Some(start) = s.strip_suffix('-') {
            return Ok(PageRange::From(parse_page(start)?));
        }
        if let Some((start, end)) = s.split_once('-') {
            return Ok(PageRange::Span(parse_page(start)?, parse_page(end)?));
        }
        Ok(PageRange::List(vec![parse_page(s)?]))
    }
}

fn parse_page(s: &str) -> Result<usize> {
    let page: usize = s
        .parse()
        .map_err(|_| PdfError::InvalidPageRange(format!("'{s}' is not a page number")))?;
    if page < 1 {
        return Err(PdfError::InvalidPageRange(
            "Page numbers must be >= 1".to_string(),
        ));
    }
    Ok(page)
}

impl PageRange {
    /// Resolve the selector against a concrete document length, yielding the
    /// 1-based page numbers to extract.
    pub fn resolve(&self, page_count: usize) -> Result<Vec<u32>> {
        let span = |start: usize, end: usize| -> Result<Vec<u32>> {
            if start > end {
                return Err(PdfError::InvalidPageRange(format!(
                    "Start page {start} is greater than end page {end}"
                )));
            }
            let clamped_end = end.min(page_count);
            if start > clamped_end {
                return Err(PdfError::InvalidPageRange(format!(
                    "Start page {start} exceeds document length of {page_count} pages"
                )));
            }
            Ok((start..=clamped_end).map(|p| p as u32).collect())
        };

        match self {
            PageRange::All => Ok((1..=page_count).map(|p| p as u32).collect()),
            PageRange::From(start) => span(*start, page_count.max(*start)),
            PageRange::Span(start, end) => span(*start, *end),
            PageRange::List(pages) => pages
                .iter()
                .map(|&p| {
                    if p > page_count {
                        Err(PdfError::InvalidPageRange(format!(
                            "Page {p} exceeds document length of {page_count} pages"
                        )))
                    } else {
                        Ok(p as u32)
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selectors() {
        assert_eq!("all".parse::<PageRange>().unwrap(), PageRange::All);
        assert_eq!("3-".parse::<PageRange>().unwrap(), PageRange::From(3));
        assert_eq!("2-5".parse::<PageRange>().unwrap(), PageRange::Span(2, 5));
        assert_eq!(
            "1,3,7".parse::<PageRange>().unwrap(),
            PageRange::List(vec![1, 3, 7])
        );
        assert_eq!("4".parse::<PageRange>().unwrap(), PageRange::List(vec![4]));
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<PageRange>().is_err());
        assert!("x-".parse::<PageRange>().is_err());
        assert!("0".parse::<PageRange>().is_err());
        assert!("1,two".parse::<PageRange>().is_err());
    }

    #[test]
    fn resolves_against_document_length() {
        assert_eq!(PageRange::All.resolve(3).unwrap(), vec![1, 2, 3]);
        assert_eq!(PageRange::From(3).resolve(5).unwrap(), vec![3, 4, 5]);
        assert_eq!(PageRange::Span(2, 9).resolve(4).unwrap(), vec![2, 3, 4]);
        assert!(PageRange::From(7).resolve(5).is_err());
        assert!(PageRange::List(vec![1, 6]).resolve(5).is_err());
    }
}
