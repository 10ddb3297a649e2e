//! PDF text extraction
//!
//! Page text in document order, blank pages dropped, pages joined with
//! newlines and the result whitespace-collapsed. No layout, table or image
//! recovery.

use super::{Extractor, Source};
use crate::error::CrawlError;
use crate::text::collapse_whitespace;
use crate::types::{DocumentText, ExtractionRecord};
use lopdf::Document;
use tracing::warn;

/// Extracts text from `.pdf` sources
pub struct PdfExtractor;

impl Extractor for PdfExtractor {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn matches(&self, source: &Source<'_>) -> bool {
        source.has_suffix(&[".pdf"])
    }

    fn extract(&self, source: &Source<'_>) -> Result<ExtractionRecord, CrawlError> {
        let text = pdf_text(source.bytes())?;
        Ok(ExtractionRecord::Pdf(DocumentText::new(source.origin(), text)))
    }
}

/// Normalized text of a PDF document
pub fn pdf_text(bytes: &[u8]) -> Result<String, CrawlError> {
    let document = Document::load_mem(bytes).map_err(|e| CrawlError::decode("pdf", e))?;

    let mut pages = Vec::new();
    // get_pages() is keyed by 1-based page number, so iteration is in page order
    for page_number in document.get_pages().keys() {
        let page_text = match document.extract_text(&[*page_number]) {
            Ok(text) => text,
            Err(e) => {
                warn!(page = page_number, error = %e, "Skipping unreadable PDF page");
                continue;
            }
        };
        if !page_text.trim().is_empty() {
            pages.push(page_text);
        }
    }

    Ok(collapse_whitespace(&pages.join("\n")))
}
