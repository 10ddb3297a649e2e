//! Tool builder and contract for CrawlKit
//!
//! Every crawl operation is exposed under a stable name with a JSON input
//! schema. Arguments are clamped here, before they reach the extractors.

use crate::client::{self, CrawlOptions};
use crate::directory::ToolDirectory;
use crate::error::CrawlError;
use crate::types::{
    CrawlFileArgs, CrawlManyArgs, CrawlSitemapArgs, CrawlUrlArgs, ExtractStructuredArgs,
    ExtractionRecord, NoArgs, RandomToolsArgs, SitemapResult, StructuredResult, ToolDetail,
};
use crate::{TOOL_DESCRIPTION, TOOL_LLMTXT};
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub const CRAWL_URL: &str = "crawl_url";
pub const CRAWL_MANY: &str = "crawl_many";
pub const CRAWL_SITEMAP: &str = "crawl_sitemap";
pub const CRAWL_FILE: &str = "crawl_file";
pub const EXTRACT_STRUCTURED: &str = "extract_structured";
pub const RANDOM_TOOL: &str = "random_tool";
pub const RANDOM_TOOLS: &str = "random_tools";

const TIMEOUT_RANGE: (i64, i64) = (1, 200);
const LIMIT_RANGE: (i64, i64) = (1, 200);
const COUNT_RANGE: (i64, i64) = (1, 10);

/// Timeout in seconds, clamped to 1..=200
pub fn clamp_timeout(timeout_sec: i64) -> Duration {
    Duration::from_secs(timeout_sec.clamp(TIMEOUT_RANGE.0, TIMEOUT_RANGE.1) as u64)
}

/// Sitemap limit, clamped to 1..=200
pub fn clamp_limit(limit: i64) -> usize {
    limit.clamp(LIMIT_RANGE.0, LIMIT_RANGE.1) as usize
}

/// Random tool count, clamped to 1..=10
pub fn clamp_count(count: i64) -> usize {
    count.clamp(COUNT_RANGE.0, COUNT_RANGE.1) as usize
}

/// Name, description and input schema of one operation
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

fn input_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or_default()
}

fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, CrawlError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| CrawlError::InvalidArguments(e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_default()
}

/// Builder for configuring the CrawlKit tool
#[derive(Debug, Clone, Default)]
pub struct ToolBuilder {
    options: CrawlOptions,
}

impl ToolBuilder {
    /// Create a new tool builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.options.user_agent = Some(ua.into());
        self
    }

    /// Route all traffic through a proxy
    pub fn proxy_url(mut self, proxy: impl Into<String>) -> Self {
        self.options.proxy_url = Some(proxy.into());
        self
    }

    /// Override the tool directory search endpoint
    pub fn search_api_url(mut self, url: impl Into<String>) -> Self {
        self.options.search_api_url = Some(url.into());
        self
    }

    /// Override the tool detail page prefix
    pub fn tool_base_url(mut self, url: impl Into<String>) -> Self {
        self.options.tool_base_url = Some(url.into());
        self
    }

    /// Build the tool
    pub fn build(self) -> Tool {
        Tool {
            options: self.options,
        }
    }
}

/// Configured CrawlKit tool
#[derive(Debug, Clone, Default)]
pub struct Tool {
    options: CrawlOptions,
}

impl Tool {
    /// Create a new tool builder
    pub fn builder() -> ToolBuilder {
        ToolBuilder::new()
    }

    /// Get tool description
    pub fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }

    /// Get full documentation (llmtxt)
    pub fn llmtxt(&self) -> &'static str {
        TOOL_LLMTXT
    }

    pub fn options(&self) -> &CrawlOptions {
        &self.options
    }

    /// Definitions of every exposed operation
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: CRAWL_URL,
                description: "Fetch a web page and return its title, description, visible text and links. Non-HTML responses return content type and size only.",
                input_schema: input_schema::<CrawlUrlArgs>(),
            },
            ToolDefinition {
                name: CRAWL_MANY,
                description: "Crawl up to 20 URLs one after another. Failures are reported as error records; the call itself never fails.",
                input_schema: input_schema::<CrawlManyArgs>(),
            },
            ToolDefinition {
                name: CRAWL_SITEMAP,
                description: "List the URLs of an XML sitemap (at most `limit`, 1-200).",
                input_schema: input_schema::<CrawlSitemapArgs>(),
            },
            ToolDefinition {
                name: CRAWL_FILE,
                description: "Extract text from a local file or URL: PDF, DOCX, markdown, plain text or HTML.",
                input_schema: input_schema::<CrawlFileArgs>(),
            },
            ToolDefinition {
                name: EXTRACT_STRUCTURED,
                description: "Extract fields from a page with a JSON schema of CSS selectors. A string takes the first match, a one-element array takes every match.",
                input_schema: input_schema::<ExtractStructuredArgs>(),
            },
            ToolDefinition {
                name: RANDOM_TOOL,
                description: "Pick one random recently added AI tool from the Futurepedia directory and return its details.",
                input_schema: input_schema::<NoArgs>(),
            },
            ToolDefinition {
                name: RANDOM_TOOLS,
                description: "Pick several (1-10) random recently added AI tools from the Futurepedia directory.",
                input_schema: input_schema::<RandomToolsArgs>(),
            },
        ]
    }

    pub async fn crawl_url(
        &self,
        url: &str,
        timeout_sec: i64,
    ) -> Result<ExtractionRecord, CrawlError> {
        client::crawl_url(url, clamp_timeout(timeout_sec), &self.options).await
    }

    pub async fn crawl_many(&self, urls: &[String], timeout_sec: i64) -> Vec<ExtractionRecord> {
        client::crawl_many(urls, clamp_timeout(timeout_sec), &self.options).await
    }

    pub async fn crawl_sitemap(
        &self,
        sitemap_url: &str,
        limit: i64,
        timeout_sec: i64,
    ) -> Result<SitemapResult, CrawlError> {
        client::crawl_sitemap(
            sitemap_url,
            clamp_limit(limit),
            clamp_timeout(timeout_sec),
            &self.options,
        )
        .await
    }

    pub async fn crawl_file(
        &self,
        source: &str,
        timeout_sec: i64,
    ) -> Result<ExtractionRecord, CrawlError> {
        client::crawl_file(source, clamp_timeout(timeout_sec), &self.options).await
    }

    pub async fn extract_structured(
        &self,
        url: &str,
        schema_json: &str,
        timeout_sec: i64,
    ) -> Result<StructuredResult, CrawlError> {
        client::extract_structured(url, schema_json, clamp_timeout(timeout_sec), &self.options)
            .await
    }

    pub async fn random_tool(&self) -> Result<ToolDetail, CrawlError> {
        ToolDirectory::new(self.options.clone()).random_tool().await
    }

    pub async fn random_tools(&self, count: i64) -> Result<Vec<ToolDetail>, CrawlError> {
        ToolDirectory::new(self.options.clone())
            .random_tools(clamp_count(count))
            .await
    }

    /// Run the operation called `name` with JSON `arguments`
    ///
    /// `null` arguments are treated as an empty object, so every default
    /// applies.
    pub async fn call(&self, name: &str, arguments: Value) -> Result<Value, CrawlError> {
        tracing::debug!(operation = name, "Tool call");
        match name {
            CRAWL_URL => {
                let args: CrawlUrlArgs = parse_args(arguments)?;
                Ok(to_json(&self.crawl_url(&args.url, args.timeout_sec).await?))
            }
            CRAWL_MANY => {
                let args: CrawlManyArgs = parse_args(arguments)?;
                Ok(to_json(&self.crawl_many(&args.urls, args.timeout_sec).await))
            }
            CRAWL_SITEMAP => {
                let args: CrawlSitemapArgs = parse_args(arguments)?;
                let result = self
                    .crawl_sitemap(&args.sitemap_url, args.limit, args.timeout_sec)
                    .await?;
                Ok(to_json(&result))
            }
            CRAWL_FILE => {
                let args: CrawlFileArgs = parse_args(arguments)?;
                Ok(to_json(
                    &self.crawl_file(&args.source, args.timeout_sec).await?,
                ))
            }
            EXTRACT_STRUCTURED => {
                let args: ExtractStructuredArgs = parse_args(arguments)?;
                let result = self
                    .extract_structured(&args.url, &args.schema_json, args.timeout_sec)
                    .await?;
                Ok(to_json(&result))
            }
            RANDOM_TOOL => {
                let _: NoArgs = parse_args(arguments)?;
                Ok(to_json(&self.random_tool().await?))
            }
            RANDOM_TOOLS => {
                let args: RandomToolsArgs = parse_args(arguments)?;
                Ok(to_json(&self.random_tools(args.count).await?))
            }
            other => Err(CrawlError::UnknownOperation(other.to_string())),
        }
    }
}
