//! Document text boundary: pages of text lines, in page order.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A document that yields text lines page by page.
pub trait PageSource {
    /// Number of pages.
    fn page_count(&self) -> u32;

    /// Lines of one page (1-indexed), in extraction order.
    fn page_lines(&self, page: u32) -> Result<Vec<String>>;

    /// Characters of text across all pages, ignoring surrounding whitespace.
    fn text_len(&self) -> usize;

    /// All pages in order. Stops at the first failing page.
    fn pages(&self) -> Result<Vec<Vec<String>>> {
        (1..=self.page_count()).map(|page| self.page_lines(page)).collect()
    }
}

/// Pages built from text that was already extracted.
///
/// Pages are separated by form feeds, as pdf-to-text tools emit them.
#[derive(Debug, Clone, Default)]
pub struct TextPages {
    pages: Vec<String>,
}

impl TextPages {
    /// Split text into pages on `\x0c`. A trailing form feed does not add a page.
    pub fn from_text(text: &str) -> Self {
        let mut pages: Vec<String> = text.split('\x0c').map(str::to_string).collect();
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        Self { pages }
    }

    /// One entry per page.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }
}

impl PageSource for TextPages {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_lines(&self, page: u32) -> Result<Vec<String>> {
        let index = page.checked_sub(1).ok_or(PdfError::InvalidPage(page))? as usize;
        let text = self.pages.get(index).ok_or(PdfError::InvalidPage(page))?;
        Ok(text.lines().map(str::to_string).collect())
    }

    fn text_len(&self) -> usize {
        self.pages.iter().map(|p| p.trim().len()).sum()
    }
}
