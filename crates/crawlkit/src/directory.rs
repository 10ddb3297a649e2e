//! Random tool discovery against the Futurepedia directory
//!
//! Picks one tool from the directory's "newest" search listing and turns
//! its detail page into a [`ToolDetail`].

use crate::client::CrawlOptions;
use crate::detail::extract_tool_page;
use crate::error::CrawlError;
use crate::http::{download, post_json};
use crate::types::{ToolDetail, ToolListing};
use rand::Rng;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Default directory search endpoint
pub const SEARCH_API_URL: &str = "https://www.futurepedia.io/api/search";

/// Default prefix for tool detail pages
pub const TOOL_BASE_URL: &str = "https://www.futurepedia.io/tool/";

/// Timeout for both the search and the detail request
const DIRECTORY_TIMEOUT: Duration = Duration::from_secs(20);

/// Search API response (partial)
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    #[serde(default)]
    slug: Option<Slug>,
    #[serde(default)]
    tool_name: Option<String>,
    #[serde(default)]
    tool_short_description: Option<String>,
    #[serde(default)]
    website_url: Option<String>,
}

/// Slugs come either as a plain string or as `{"current": "..."}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Slug {
    Plain(String),
    Sanity {
        #[serde(default)]
        current: Option<String>,
    },
    Other(serde_json::Value),
}

impl Slug {
    fn value(&self) -> &str {
        match self {
            Slug::Plain(s) => s.trim(),
            Slug::Sanity { current } => current.as_deref().unwrap_or_default().trim(),
            Slug::Other(_) => "",
        }
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().trim().to_string()
}

impl SearchItem {
    fn into_listing(self) -> Result<ToolListing, CrawlError> {
        let slug = self
            .slug
            .as_ref()
            .map(Slug::value)
            .unwrap_or_default()
            .to_string();
        if slug.is_empty() {
            return Err(CrawlError::Directory("item missing slug".to_string()));
        }
        Ok(ToolListing {
            slug,
            name: trimmed(&self.tool_name),
            short_description: trimmed(&self.tool_short_description),
            website_url: trimmed(&self.website_url),
        })
    }
}

/// Client for the tool directory
#[derive(Debug, Clone)]
pub struct ToolDirectory {
    search_api_url: String,
    tool_base_url: String,
    options: CrawlOptions,
}

impl ToolDirectory {
    /// Create a directory client, honouring endpoint overrides in `options`
    pub fn new(options: CrawlOptions) -> Self {
        Self {
            search_api_url: options
                .search_api_url
                .clone()
                .unwrap_or_else(|| SEARCH_API_URL.to_string()),
            tool_base_url: options
                .tool_base_url
                .clone()
                .unwrap_or_else(|| TOOL_BASE_URL.to_string()),
            options,
        }
    }

    /// Detail page URL for a slug
    pub fn tool_url(&self, slug: &str) -> String {
        format!("{}{}", self.tool_base_url, slug)
    }

    /// Pick one tool at random from the newest listing
    pub async fn random_listing(&self) -> Result<ToolListing, CrawlError> {
        let payload = json!({"query": "", "page": 1, "sort": "new"});
        let fetched = post_json(
            &self.search_api_url,
            &payload,
            DIRECTORY_TIMEOUT,
            &self.options,
        )
        .await?;

        let response: SearchResponse = serde_json::from_slice(&fetched.body)
            .map_err(|e| CrawlError::Directory(format!("invalid search response: {}", e)))?;
        let mut items = response.data.unwrap_or_default();
        if items.is_empty() {
            return Err(CrawlError::Directory(
                "search returned no items".to_string(),
            ));
        }

        let index = rand::thread_rng().gen_range(0..items.len());
        items.swap_remove(index).into_listing()
    }

    /// Fetch and extract one random tool
    pub async fn random_tool(&self) -> Result<ToolDetail, CrawlError> {
        let listing = self.random_listing().await?;
        let url = self.tool_url(&listing.slug);
        tracing::debug!(slug = %listing.slug, url = %url, "Fetching tool page");

        let fetched = download(&url, DIRECTORY_TIMEOUT, &self.options).await?;
        extract_tool_page(&fetched.text(), &listing, &url)
    }

    /// Fetch `count` random tools one after another; the first failure aborts
    pub async fn random_tools(&self, count: usize) -> Result<Vec<ToolDetail>, CrawlError> {
        let mut tools = Vec::with_capacity(count);
        for _ in 0..count {
            tools.push(self.random_tool().await?);
        }
        Ok(tools)
    }
}

impl Default for ToolDirectory {
    fn default() -> Self {
        Self::new(CrawlOptions::default())
    }
}
