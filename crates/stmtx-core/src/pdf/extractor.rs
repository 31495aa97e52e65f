//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace};

use super::{PageSource, Result, TextPages};
use crate::error::PdfError;

/// PDF page text extractor.
///
/// lopdf opens the document (decrypting empty-password files); pdf-extract
/// lays out the text of each page.
pub struct PdfExtractor {
    document: Option<Document>,
    pages: TextPages,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            pages: TextPages::default(),
        }
    }

    /// Load a PDF from bytes and extract the text of every page.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted_data
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let pages = pdf_extract::extract_text_from_mem_by_pages(&raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        if pages.len() != page_count {
            debug!(
                "pdf-extract returned {} pages, document has {}",
                pages.len(),
                page_count
            );
        }
        for (i, page) in pages.iter().enumerate() {
            trace!("Page {}: {} chars", i + 1, page.len());
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        self.pages = TextPages::from_pages(pages);
        Ok(())
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSource for PdfExtractor {
    fn page_count(&self) -> u32 {
        self.pages.page_count()
    }

    fn page_lines(&self, page: u32) -> Result<Vec<String>> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        self.pages.page_lines(page)
    }

    fn text_len(&self) -> usize {
        self.pages.text_len()
    }
}
