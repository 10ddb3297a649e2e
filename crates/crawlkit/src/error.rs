//! Error types for CrawlKit

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching or extracting content
#[derive(Debug, Error)]
pub enum CrawlError {
    /// URL could not be parsed or is not http(s)
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// Request did not complete within the timeout
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    Connect(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    Request(String),

    /// Local path does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Local path exists but could not be read
    #[error("Failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed PDF or DOCX payload
    #[error("Failed to decode {format} document: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },

    /// Malformed sitemap XML
    #[error("Failed to parse sitemap XML: {0}")]
    Parse(String),

    /// A mandatory record field could not be resolved
    #[error("Page has no {0}")]
    MissingField(&'static str),

    /// Structured extraction schema is not a JSON object
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Random-tool discovery returned nothing usable
    #[error("Tool directory error: {0}")]
    Directory(String),

    /// Tool boundary was asked for an operation it does not expose
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Tool arguments did not match the operation's input schema
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl CrawlError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CrawlError::Timeout
        } else if err.is_connect() {
            CrawlError::Connect(err)
        } else if let Some(status) = err.status() {
            CrawlError::Status {
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
                status: status.as_u16(),
            }
        } else {
            CrawlError::Request(err.to_string())
        }
    }

    pub(crate) fn decode(format: &'static str, err: impl std::fmt::Display) -> Self {
        CrawlError::Decode {
            format,
            message: err.to_string(),
        }
    }

    /// True for failures of the network fetch itself
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            CrawlError::InvalidUrl(_)
                | CrawlError::ClientBuild(_)
                | CrawlError::Status { .. }
                | CrawlError::Timeout
                | CrawlError::Connect(_)
                | CrawlError::Request(_)
        )
    }
}
