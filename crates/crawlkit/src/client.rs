//! Crawl operations for CrawlKit
//!
//! This module provides the main entry points: page crawl, batch crawl,
//! sitemap crawl, file extraction and schema-driven extraction. Format
//! handling lives in the [`extractors`](crate::extractors) module.

use crate::error::CrawlError;
use crate::extractors::ExtractorRegistry;
use crate::html::extract_page;
use crate::http::{download, read_source};
use crate::sitemap::extract_sitemap;
use crate::structured::Schema;
use crate::types::{ErrorRecord, ExtractionRecord, NonHtml, SitemapResult, StructuredResult};
use futures::stream::{self, StreamExt};
use std::time::Duration;

/// Maximum number of URLs processed by [`crawl_many`]
pub const MAX_BATCH_URLS: usize = 20;

/// Options shared by every crawl operation
#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Proxy for both http and https traffic
    pub proxy_url: Option<String>,
    /// Tool directory search endpoint (random-tool discovery)
    pub search_api_url: Option<String>,
    /// Prefix that a tool slug is appended to (random-tool discovery)
    pub tool_base_url: Option<String>,
}

/// Fetch a page and extract it as HTML
///
/// A response whose content type is not HTML yields a shallow `non-html`
/// record; the URL suffix plays no part in the decision.
pub async fn crawl_url(
    url: &str,
    timeout: Duration,
    options: &CrawlOptions,
) -> Result<ExtractionRecord, CrawlError> {
    let fetched = download(url, timeout, options).await?;

    if !fetched.is_html() {
        tracing::debug!(url, content_type = ?fetched.content_type, "Non-HTML response");
        return Ok(ExtractionRecord::NonHtml(NonHtml {
            url: url.to_string(),
            content_type: fetched.content_type_lower(),
            size_bytes: fetched.body.len(),
        }));
    }

    Ok(ExtractionRecord::Html(extract_page(&fetched.text(), url)))
}

/// Crawl up to [`MAX_BATCH_URLS`] pages one after another
///
/// A failing URL becomes an `error` record in its slot; the batch itself
/// never fails.
pub async fn crawl_many(
    urls: &[String],
    timeout: Duration,
    options: &CrawlOptions,
) -> Vec<ExtractionRecord> {
    stream::iter(urls.iter().take(MAX_BATCH_URLS))
        .then(|url| async move {
            match crawl_url(url, timeout, options).await {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Crawl failed");
                    ExtractionRecord::Error(ErrorRecord {
                        url: url.clone(),
                        error: e.to_string(),
                    })
                }
            }
        })
        .collect()
        .await
}

/// Fetch a sitemap and list its URLs, at most `limit` of them
pub async fn crawl_sitemap(
    sitemap_url: &str,
    limit: usize,
    timeout: Duration,
    options: &CrawlOptions,
) -> Result<SitemapResult, CrawlError> {
    let fetched = download(sitemap_url, timeout, options).await?;
    extract_sitemap(sitemap_url, &fetched.body, limit)
}

/// Extract text from a local path or http(s) URL, dispatching on format
pub async fn crawl_file(
    source: &str,
    timeout: Duration,
    options: &CrawlOptions,
) -> Result<ExtractionRecord, CrawlError> {
    let bytes = read_source(source, timeout, options).await?;
    ExtractorRegistry::with_defaults().extract(source, &bytes)
}

/// Fetch a page and apply a JSON selector schema to it
///
/// The schema is parsed before any network traffic.
pub async fn extract_structured(
    url: &str,
    schema_json: &str,
    timeout: Duration,
    options: &CrawlOptions,
) -> Result<StructuredResult, CrawlError> {
    let schema = Schema::parse(schema_json)?;
    let fetched = download(url, timeout, options).await?;
    Ok(schema.extract(&fetched.text(), url))
}
