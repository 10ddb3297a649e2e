//! Core types for CrawlKit

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Normalized body text with its character count
///
/// `text_length` is always derived from `text`; there is no way to set it
/// independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct TextBody {
    text: String,
    text_length: usize,
}

impl TextBody {
    /// Wrap already-normalized text
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let text_length = text.chars().count();
        Self { text, text_length }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_length(&self) -> usize {
        self.text_length
    }
}

/// Record produced by the HTML semantic extractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct HtmlPage {
    /// Origin URL or path
    pub url: String,
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub body: TextBody,
    /// Absolute, de-duplicated, at most 50 entries
    pub links: Vec<String>,
}

/// Record for a text-only document (PDF, DOCX, markdown, text, unknown)
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct DocumentText {
    /// Origin URL or path
    pub source: String,
    #[serde(flatten)]
    pub body: TextBody,
}

impl DocumentText {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            body: TextBody::new(text),
        }
    }
}

/// Shallow record for a fetched page whose content type is not HTML
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct NonHtml {
    pub url: String,
    pub content_type: String,
    pub size_bytes: usize,
}

/// Inline failure for one item of a batch crawl
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ErrorRecord {
    pub url: String,
    pub error: String,
}

/// Normalized output of processing one content source
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ExtractionRecord {
    /// Fetched web page
    Html(HtmlPage),
    /// HTML sniffed from a file or an unsuffixed download
    HtmlFile(HtmlPage),
    Pdf(DocumentText),
    Docx(DocumentText),
    Markdown(DocumentText),
    Text(DocumentText),
    BinaryOrUnknown(DocumentText),
    NonHtml(NonHtml),
    Error(ErrorRecord),
}

impl ExtractionRecord {
    /// The serialized `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionRecord::Html(_) => "html",
            ExtractionRecord::HtmlFile(_) => "html-file",
            ExtractionRecord::Pdf(_) => "pdf",
            ExtractionRecord::Docx(_) => "docx",
            ExtractionRecord::Markdown(_) => "markdown",
            ExtractionRecord::Text(_) => "text",
            ExtractionRecord::BinaryOrUnknown(_) => "binary-or-unknown",
            ExtractionRecord::NonHtml(_) => "non-html",
            ExtractionRecord::Error(_) => "error",
        }
    }

    /// Origin identifier of the record
    pub fn origin(&self) -> &str {
        match self {
            ExtractionRecord::Html(page) | ExtractionRecord::HtmlFile(page) => &page.url,
            ExtractionRecord::Pdf(doc)
            | ExtractionRecord::Docx(doc)
            | ExtractionRecord::Markdown(doc)
            | ExtractionRecord::Text(doc)
            | ExtractionRecord::BinaryOrUnknown(doc) => &doc.source,
            ExtractionRecord::NonHtml(record) => &record.url,
            ExtractionRecord::Error(record) => &record.url,
        }
    }

    /// Body text, for records that carry one
    pub fn body(&self) -> Option<&TextBody> {
        match self {
            ExtractionRecord::Html(page) | ExtractionRecord::HtmlFile(page) => Some(&page.body),
            ExtractionRecord::Pdf(doc)
            | ExtractionRecord::Docx(doc)
            | ExtractionRecord::Markdown(doc)
            | ExtractionRecord::Text(doc)
            | ExtractionRecord::BinaryOrUnknown(doc) => Some(&doc.body),
            ExtractionRecord::NonHtml(_) | ExtractionRecord::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ExtractionRecord::Error(_))
    }
}

/// Result of a sitemap crawl
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SitemapResult {
    pub sitemap_url: String,
    /// Number of `loc` entries found in the document
    pub total_urls: usize,
    /// Limit-bounded prefix of the found URLs
    pub urls: Vec<String>,
}

/// Result of schema-driven extraction
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct StructuredResult {
    pub url: String,
    /// Field name to string, list of strings, or null
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Structured record for a single tool-directory detail page
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct ToolDetail {
    pub name: String,
    pub description: String,
    pub url: String,
    pub website_url: String,
    pub what_is: String,
    pub key_features: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub who_uses: String,
    pub og_image: String,
}

/// Directory metadata used when the detail page lacks a field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolListing {
    pub slug: String,
    pub name: String,
    pub short_description: String,
    pub website_url: String,
}

fn default_timeout() -> i64 {
    crate::DEFAULT_TIMEOUT_SECS
}

fn default_limit() -> i64 {
    20
}

fn default_count() -> i64 {
    3
}

/// Arguments for `crawl_url`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CrawlUrlArgs {
    /// Page URL (http:// or https://)
    pub url: String,
    /// Timeout in seconds (1-200, default 30)
    #[serde(default = "default_timeout")]
    pub timeout_sec: i64,
}

/// Arguments for `crawl_many`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CrawlManyArgs {
    /// URLs to crawl; only the first 20 are used
    pub urls: Vec<String>,
    /// Timeout in seconds per URL (1-200, default 30)
    #[serde(default = "default_timeout")]
    pub timeout_sec: i64,
}

/// Arguments for `crawl_sitemap`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CrawlSitemapArgs {
    /// Sitemap URL
    pub sitemap_url: String,
    /// Maximum number of URLs returned (1-200, default 20)
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Timeout in seconds (1-200, default 30)
    #[serde(default = "default_timeout")]
    pub timeout_sec: i64,
}

/// Arguments for `crawl_file`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CrawlFileArgs {
    /// Local file path or http(s) URL (txt/md/html/pdf/docx)
    pub source: String,
    /// Timeout in seconds (1-200, default 30)
    #[serde(default = "default_timeout")]
    pub timeout_sec: i64,
}

/// Arguments for `extract_structured`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractStructuredArgs {
    /// Page URL
    pub url: String,
    /// JSON object mapping field names to a CSS selector (first match)
    /// or a one-element array with a CSS selector (all matches)
    pub schema_json: String,
    /// Timeout in seconds (1-200, default 30)
    #[serde(default = "default_timeout")]
    pub timeout_sec: i64,
}

/// Arguments for `random_tools`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RandomToolsArgs {
    /// Number of tools (1-10, default 3)
    #[serde(default = "default_count")]
    pub count: i64,
}

/// `random_tool` takes no arguments
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NoArgs {}
