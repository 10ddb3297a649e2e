//! Byte source resolution
//!
//! Obtains the full payload for a URL or local path. Every call builds
//! and drops its own HTTP client; there is no retry and no streaming.

use crate::client::CrawlOptions;
use crate::error::CrawlError;
use crate::DEFAULT_USER_AGENT;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Accept header sent with every request
const ACCEPT_VALUE: &str = "application/json,text/html;q=0.9,*/*;q=0.8";

/// A successfully fetched (2xx) response, fully buffered
#[derive(Debug, Clone)]
pub struct Fetched {
    pub url: String,
    pub status: u16,
    /// Content-Type header value, if any
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Fetched {
    /// Lowercased content type, empty when absent
    pub fn content_type_lower(&self) -> String {
        self.content_type
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
    }

    /// True when the declared content type is HTML or XHTML
    pub fn is_html(&self) -> bool {
        let ct = self.content_type_lower();
        ct.contains("text/html") || ct.contains("application/xhtml")
    }

    /// Body decoded as UTF-8, invalid sequences replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// True when `source` parses as an http(s) URL
pub fn is_http_url(source: &str) -> bool {
    Url::parse(source)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

fn parse_http_url(url: &str) -> Result<Url, CrawlError> {
    let parsed = Url::parse(url).map_err(|e| CrawlError::InvalidUrl(format!("{}: {}", url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CrawlError::InvalidUrl(format!(
            "{}: must start with http:// or https://",
            url
        )));
    }
    Ok(parsed)
}

/// Build a client for one call
pub(crate) fn build_client(
    options: &CrawlOptions,
    timeout: Duration,
) -> Result<reqwest::Client, CrawlError> {
    let mut headers = HeaderMap::new();
    let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
    );
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(timeout)
        .timeout(timeout);

    if let Some(proxy_url) = options.proxy_url.as_deref().filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy_url.trim()).map_err(CrawlError::ClientBuild)?;
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(CrawlError::ClientBuild)
}

/// Turn a sent request into a buffered 2xx response
async fn finish(url: &str, response: reqwest::Response) -> Result<Fetched, CrawlError> {
    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let body = response.bytes().await.map_err(CrawlError::from_reqwest)?;

    Ok(Fetched {
        url: url.to_string(),
        status: status.as_u16(),
        content_type,
        body,
    })
}

/// GET `url` and buffer the body; non-2xx is an error
pub async fn download(
    url: &str,
    timeout: Duration,
    options: &CrawlOptions,
) -> Result<Fetched, CrawlError> {
    let parsed = parse_http_url(url)?;
    let client = build_client(options, timeout)?;

    tracing::debug!(url, timeout_secs = timeout.as_secs(), "GET");
    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(CrawlError::from_reqwest)?;

    finish(url, response).await
}

/// POST a JSON body to `url` and buffer the response; non-2xx is an error
pub async fn post_json(
    url: &str,
    payload: &serde_json::Value,
    timeout: Duration,
    options: &CrawlOptions,
) -> Result<Fetched, CrawlError> {
    let parsed = parse_http_url(url)?;
    let client = build_client(options, timeout)?;

    tracing::debug!(url, "POST");
    let response = client
        .post(parsed)
        .json(payload)
        .send()
        .await
        .map_err(CrawlError::from_reqwest)?;

    finish(url, response).await
}

/// Read the bytes behind `source`: an http(s) URL or a local path
pub async fn read_source(
    source: &str,
    timeout: Duration,
    options: &CrawlOptions,
) -> Result<Bytes, CrawlError> {
    if is_http_url(source) {
        return Ok(download(source, timeout, options).await?.body);
    }

    let path = PathBuf::from(source);
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Err(CrawlError::NotFound(path));
    }
    tokio::fs::read(&path)
        .await
        .map(Bytes::from)
        .map_err(|source| CrawlError::Io { path, source })
}
