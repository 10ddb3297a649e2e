//! Format-aware extractors for file content
//!
//! Design: Each extractor claims sources by suffix or by sniffing the
//! decoded payload. ExtractorRegistry dispatches to the first match.

mod docx;
mod pdf;
mod plain;

pub use docx::{docx_text, DocxExtractor};
pub use pdf::{pdf_text, PdfExtractor};
pub use plain::{HtmlFileExtractor, MarkdownExtractor, PlainTextExtractor, UnknownExtractor};

use crate::error::CrawlError;
use crate::text::decode_lossy;
use crate::types::ExtractionRecord;
use std::cell::OnceCell;

/// A payload plus the identifier it came from
pub struct Source<'a> {
    origin: &'a str,
    path: String,
    bytes: &'a [u8],
    decoded: OnceCell<String>,
}

impl<'a> Source<'a> {
    pub fn new(origin: &'a str, bytes: &'a [u8]) -> Self {
        Self {
            origin,
            path: normalized_path(origin),
            bytes,
            decoded: OnceCell::new(),
        }
    }

    /// URL or path as given by the caller
    pub fn origin(&self) -> &str {
        self.origin
    }

    pub fn bytes(&self) -> &[u8] {
        self.bytes
    }

    /// True when the lowercased, query-stripped origin ends with any of `suffixes`
    pub fn has_suffix(&self, suffixes: &[&str]) -> bool {
        suffixes.iter().any(|s| self.path.ends_with(s))
    }

    /// Payload decoded as UTF-8 with invalid sequences dropped
    pub fn text(&self) -> &str {
        self.decoded.get_or_init(|| decode_lossy(self.bytes))
    }
}

/// Lowercase and cut at the first `?`
fn normalized_path(origin: &str) -> String {
    let lower = origin.to_lowercase();
    match lower.split_once('?') {
        Some((path, _)) => path.to_string(),
        None => lower,
    }
}

/// Trait for format-specific content extractors
///
/// Each extractor declares which sources it handles via `matches()` and
/// turns the payload into a record via `extract()`.
pub trait Extractor: Send + Sync {
    /// Unique identifier for this extractor (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Returns true if this extractor handles the given source
    fn matches(&self, source: &Source<'_>) -> bool;

    /// Extract a record from the source
    ///
    /// Called only if `matches()` returned true.
    fn extract(&self, source: &Source<'_>) -> Result<ExtractionRecord, CrawlError>;
}

/// Registry of extractors that dispatches to the appropriate handler
///
/// Maintains an ordered list of extractors; the first one whose
/// `matches()` accepts the source wins.
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn Extractor>>,
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ExtractorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Create a registry with the built-in extractors
    ///
    /// Suffix matches come first (pdf, docx, markdown, plain text), then
    /// HTML sniffing, then the catch-all for unknown payloads.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PdfExtractor));
        registry.register(Box::new(DocxExtractor));
        registry.register(Box::new(MarkdownExtractor));
        registry.register(Box::new(PlainTextExtractor));
        registry.register(Box::new(HtmlFileExtractor));
        registry.register(Box::new(UnknownExtractor));
        registry
    }

    /// Register an extractor
    ///
    /// Extractors are checked in registration order.
    pub fn register(&mut self, extractor: Box<dyn Extractor>) {
        self.extractors.push(extractor);
    }

    /// Extract `bytes` that came from `origin`
    pub fn extract(&self, origin: &str, bytes: &[u8]) -> Result<ExtractionRecord, CrawlError> {
        let source = Source::new(origin, bytes);
        for extractor in &self.extractors {
            if extractor.matches(&source) {
                tracing::debug!(extractor = extractor.name(), origin, "Using extractor");
                return extractor.extract(&source);
            }
        }
        // Only reachable from a registry without UnknownExtractor
        UnknownExtractor.extract(&source)
    }
}

/// Extract file content with the default registry
pub fn extract_file_content(origin: &str, bytes: &[u8]) -> Result<ExtractionRecord, CrawlError> {
    ExtractorRegistry::with_defaults().extract(origin, bytes)
}
