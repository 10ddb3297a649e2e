//! CrawlKit - agent-friendly content crawling and text extraction
//!
//! This crate turns web pages, sitemaps and documents (PDF, DOCX, markdown,
//! plain text) into normalized, text-centric records.
//!
//! ## Extractor System
//!
//! File content is routed through a pluggable extractor system. The
//! [`ExtractorRegistry`] hands a payload to the first [`Extractor`] whose
//! `matches()` accepts it, by path suffix first and content sniffing second.
//!
//! Built-in extractors:
//! - [`PdfExtractor`] - page text, blank pages skipped
//! - [`DocxExtractor`] - body paragraph text
//! - [`MarkdownExtractor`] / [`PlainTextExtractor`] - whitespace-normalized text
//! - [`HtmlFileExtractor`] - sniffed HTML, full page extraction
//! - [`UnknownExtractor`] - `binary-or-unknown` record with empty text for anything else
//!
//! ## Operations
//!
//! [`crawl_url`], [`crawl_many`], [`crawl_sitemap`], [`crawl_file`] and
//! [`extract_structured`] are plain async functions. [`Tool`] wraps them
//! with argument clamping and name-based dispatch for agent tool calls.

pub mod client;
pub mod detail;
pub mod directory;
mod error;
pub mod extractors;
pub mod html;
pub mod http;
pub mod sections;
pub mod sitemap;
pub mod structured;
pub mod text;
mod tool;
mod types;

pub use client::{
    crawl_file, crawl_many, crawl_sitemap, crawl_url, extract_structured, CrawlOptions,
    MAX_BATCH_URLS,
};
pub use detail::extract_tool_page;
pub use directory::ToolDirectory;
pub use error::CrawlError;
pub use extractors::{
    extract_file_content, DocxExtractor, Extractor, ExtractorRegistry, HtmlFileExtractor,
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, Source, UnknownExtractor,
};
pub use html::extract_page;
pub use sections::{list_section, narrative_section};
pub use sitemap::extract_sitemap;
pub use structured::{Schema, SelectorSpec};
pub use tool::{Tool, ToolBuilder, ToolDefinition};
pub use types::{
    CrawlFileArgs, CrawlManyArgs, CrawlSitemapArgs, CrawlUrlArgs, DocumentText, ErrorRecord,
    ExtractStructuredArgs, ExtractionRecord, HtmlPage, NoArgs, NonHtml, RandomToolsArgs,
    SitemapResult, StructuredResult, TextBody, ToolDetail, ToolListing,
};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "Everruns CrawlKit/1.0";

/// Default timeout for every network operation, in seconds
pub const DEFAULT_TIMEOUT_SECS: i64 = 30;

/// Tool description for LLM consumption
pub const TOOL_DESCRIPTION: &str = r#"Crawls web pages, sitemaps and documents and returns normalized text records.

- Page crawl with title, description, visible text and links
- Batch crawl (up to 20 URLs, failures reported inline)
- Sitemap URL listing
- Text extraction from PDF, DOCX, markdown, text and HTML files
- CSS-selector driven structured extraction
- Random AI tool discovery from the Futurepedia directory"#;

/// Extended documentation for LLM consumption (llmtxt)
pub const TOOL_LLMTXT: &str = r#"# CrawlKit Tools

Crawls web pages, sitemaps and documents and reduces them to text-centric
records.

## Operations

### crawl_url
Fetch one page. HTML responses yield a record with `type: "html"`; any
other content type yields `type: "non-html"` with `content_type` and
`size_bytes` only.
- `url` (required): http:// or https:// URL
- `timeout_sec` (optional): 1-200, default 30

### crawl_many
Crawl up to 20 URLs one after another. A failing URL becomes a
`type: "error"` record with `url` and `error`; the call itself never fails.
- `urls` (required): list of URLs
- `timeout_sec` (optional): per URL, 1-200, default 30

### crawl_sitemap
List the `<loc>` URLs of an XML sitemap, namespace-agnostic.
- `sitemap_url` (required)
- `limit` (optional): 1-200, default 20
- `timeout_sec` (optional)

### crawl_file
Extract text from a local path or http(s) URL. Dispatch is by suffix:
`.pdf`, `.docx`, `.md`/`.markdown`, `.txt`/`.log`/`.csv`/`.json`/`.xml`;
otherwise HTML is sniffed. Anything else yields a `binary-or-unknown`
record with empty text.
- `source` (required)
- `timeout_sec` (optional)

### extract_structured
Apply a JSON schema of CSS selectors to a page.
- `url` (required)
- `schema_json` (required): JSON object; a string value takes the first
  match's text, a one-element array takes the text of every match, any
  other value yields null
- `timeout_sec` (optional)

### random_tool / random_tools
Pick random recently added AI tools from the Futurepedia directory and
return name, description, url, website_url, what_is, key_features, pros,
cons, who_uses and og_image.
- `count` (random_tools only): 1-10, default 3

## Output Fields
- `type`: html, html-file, pdf, docx, markdown, text, binary-or-unknown,
  non-html or error
- `url` / `source`: origin of the record
- `text`: whitespace-collapsed body text
- `text_length`: number of characters in `text`
- `title`, `description`, `links` (HTML records; links absolute,
  de-duplicated, at most 50)

## Examples

### Crawl a page
```json
{"url": "https://example.com"}
```

### Extract fields
```json
{"url": "https://example.com", "schema_json": "{\"title\": \"h1\", \"items\": [\"li\"]}"}
```

### Read a local PDF
```json
{"source": "/tmp/report.pdf"}
```

## Error Handling
- Invalid URLs, non-2xx statuses and timeouts return an error
- Missing local files return a not-found error
- Malformed PDF/DOCX files return a decode error naming the format
- Malformed sitemap XML returns a parse error
"#;
