//! Text-family, sniffed-HTML and catch-all extractors

use super::{Extractor, Source};
use crate::error::CrawlError;
use crate::html::{extract_page, looks_like_html};
use crate::text::collapse_whitespace;
use crate::types::{DocumentText, ExtractionRecord};

const MARKDOWN_SUFFIXES: &[&str] = &[".md", ".markdown"];
const TEXT_SUFFIXES: &[&str] = &[".txt", ".log", ".csv", ".json", ".xml"];

/// `.md` / `.markdown` files, whitespace-collapsed
pub struct MarkdownExtractor;

impl Extractor for MarkdownExtractor {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn matches(&self, source: &Source<'_>) -> bool {
        source.has_suffix(MARKDOWN_SUFFIXES)
    }

    fn extract(&self, source: &Source<'_>) -> Result<ExtractionRecord, CrawlError> {
        Ok(ExtractionRecord::Markdown(DocumentText::new(
            source.origin(),
            collapse_whitespace(source.text()),
        )))
    }
}

/// Plain-text family: txt, log, csv, json, xml
pub struct PlainTextExtractor;

impl Extractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "text"
    }

    fn matches(&self, source: &Source<'_>) -> bool {
        source.has_suffix(TEXT_SUFFIXES)
    }

    fn extract(&self, source: &Source<'_>) -> Result<ExtractionRecord, CrawlError> {
        Ok(ExtractionRecord::Text(DocumentText::new(
            source.origin(),
            collapse_whitespace(source.text()),
        )))
    }
}

/// Any payload containing an HTML document opener
pub struct HtmlFileExtractor;

impl Extractor for HtmlFileExtractor {
    fn name(&self) -> &'static str {
        "html-file"
    }

    fn matches(&self, source: &Source<'_>) -> bool {
        looks_like_html(source.text())
    }

    fn extract(&self, source: &Source<'_>) -> Result<ExtractionRecord, CrawlError> {
        Ok(ExtractionRecord::HtmlFile(extract_page(
            source.text(),
            source.origin(),
        )))
    }
}

/// Catch-all: empty text, never an error
pub struct UnknownExtractor;

impl Extractor for UnknownExtractor {
    fn name(&self) -> &'static str {
        "unknown"
    }

    fn matches(&self, _source: &Source<'_>) -> bool {
        true
    }

    fn extract(&self, source: &Source<'_>) -> Result<ExtractionRecord, CrawlError> {
        Ok(ExtractionRecord::BinaryOrUnknown(DocumentText::new(
            source.origin(),
            "",
        )))
    }
}
