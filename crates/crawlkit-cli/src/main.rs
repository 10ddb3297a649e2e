//! CrawlKit CLI - Command-line interface for crawling and extracting content

mod mcp;

use clap::{Parser, Subcommand, ValueEnum};
use crawlkit::{
    CrawlError, ExtractionRecord, SitemapResult, StructuredResult, Tool, ToolDetail,
    DEFAULT_TIMEOUT_SECS, TOOL_LLMTXT,
};
use serde::Serialize;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Output format for crawl subcommands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Markdown with YAML frontmatter
    #[default]
    Md,
    /// JSON format
    Json,
}

/// CrawlKit - agent-friendly crawling and text extraction
#[derive(Parser, Debug)]
#[command(name = "crawlkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print full help with examples (llmtxt)
    #[arg(long)]
    llmtxt: bool,

    /// Timeout in seconds (clamped to 1-200)
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        allow_negative_numbers = true
    )]
    timeout: i64,

    /// Custom User-Agent
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Output format
    #[arg(long, short, global = true, default_value = "md")]
    output: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as MCP (Model Context Protocol) server over stdio
    Mcp,
    /// Crawl a page: title, description, text and links
    Crawl {
        /// Page URL
        url: String,
    },
    /// Extract text from a local file or URL (pdf, docx, md, txt, html)
    CrawlFile {
        /// Local path or http(s) URL
        source: String,
    },
    /// List the URLs of an XML sitemap
    Sitemap {
        /// Sitemap URL
        url: String,

        /// Maximum number of URLs (clamped to 1-200)
        #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
        limit: i64,
    },
    /// Extract fields from a page with a JSON schema of CSS selectors
    Extract {
        /// Page URL
        url: String,

        /// Schema, e.g. '{"title": "h1", "items": ["li"]}'
        #[arg(long)]
        schema: String,
    },
    /// Pick random AI tools from the Futurepedia directory
    RandomTool {
        /// Number of tools (clamped to 1-10)
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        count: i64,
    },
}

/// Log to stderr so stdout stays clean for output and MCP traffic
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Build the tool from flags and the `PROXY_URL` environment variable
fn build_tool(user_agent: Option<String>) -> Tool {
    let mut builder = Tool::builder();

    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }
    if let Some(proxy) = std::env::var("PROXY_URL")
        .ok()
        .filter(|p| !p.trim().is_empty())
    {
        builder = builder.proxy_url(proxy.trim());
    }

    builder.build()
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    // Handle --llmtxt flag
    if cli.llmtxt {
        writeln_safe(TOOL_LLMTXT);
        std::process::exit(0);
    }

    let tool = build_tool(cli.user_agent);
    let timeout = cli.timeout;
    let output = cli.output;

    match cli.command {
        Some(Commands::Mcp) => {
            mcp::run_server(tool).await;
        }
        Some(Commands::Crawl { url }) => {
            let result = tool.crawl_url(&url, timeout).await;
            emit(result, output, format_record_md);
        }
        Some(Commands::CrawlFile { source }) => {
            let result = tool.crawl_file(&source, timeout).await;
            emit(result, output, format_record_md);
        }
        Some(Commands::Sitemap { url, limit }) => {
            let result = tool.crawl_sitemap(&url, limit, timeout).await;
            emit(result, output, format_sitemap_md);
        }
        Some(Commands::Extract { url, schema }) => {
            let result = tool.extract_structured(&url, &schema, timeout).await;
            emit(result, output, format_structured_md);
        }
        Some(Commands::RandomTool { count }) => {
            let result = tool.random_tools(count).await;
            emit(result, output, |tools: &Vec<ToolDetail>| {
                tools
                    .iter()
                    .map(format_tool_md)
                    .collect::<Vec<_>>()
                    .join("\n")
            });
        }
        None => {
            eprintln!("Usage: crawlkit crawl <URL>");
            eprintln!("   or: crawlkit crawl-file <PATH|URL>");
            eprintln!("   or: crawlkit sitemap <URL> [--limit N]");
            eprintln!("   or: crawlkit extract <URL> --schema <JSON>");
            eprintln!("   or: crawlkit random-tool [--count N]");
            eprintln!("   or: crawlkit mcp");
            eprintln!("   or: crawlkit --help");
            std::process::exit(1);
        }
    }
}

/// Print a result in the requested format, or the error and exit 1
fn emit<T, F>(result: Result<T, CrawlError>, output: OutputFormat, to_md: F)
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    match result {
        Ok(value) => match output {
            OutputFormat::Md => writeln_safe(&to_md(&value)),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&value).unwrap_or_else(|e| {
                    eprintln!("Error serializing response: {}", e);
                    std::process::exit(1);
                });
                writeln_safe(&json);
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Format an extraction record as markdown with YAML frontmatter
fn format_record_md(record: &ExtractionRecord) -> String {
    let mut output = String::new();

    output.push_str("---\n");
    output.push_str(&format!("type: {}\n", record.kind()));
    match record {
        ExtractionRecord::Html(page) | ExtractionRecord::HtmlFile(page) => {
            output.push_str(&format!("url: {}\n", page.url));
            if !page.title.is_empty() {
                output.push_str(&format!("title: {}\n", page.title));
            }
            if !page.description.is_empty() {
                output.push_str(&format!("description: {}\n", page.description));
            }
            output.push_str(&format!("text_length: {}\n", page.body.text_length()));
            if !page.links.is_empty() {
                output.push_str("links:\n");
                for link in &page.links {
                    output.push_str(&format!("  - {}\n", link));
                }
            }
        }
        ExtractionRecord::NonHtml(non_html) => {
            output.push_str(&format!("url: {}\n", non_html.url));
            output.push_str(&format!("content_type: {}\n", non_html.content_type));
            output.push_str(&format!("size_bytes: {}\n", non_html.size_bytes));
        }
        ExtractionRecord::Error(error) => {
            output.push_str(&format!("url: {}\n", error.url));
        }
        ExtractionRecord::Pdf(doc)
        | ExtractionRecord::Docx(doc)
        | ExtractionRecord::Markdown(doc)
        | ExtractionRecord::Text(doc)
        | ExtractionRecord::BinaryOrUnknown(doc) => {
            output.push_str(&format!("source: {}\n", doc.source));
            output.push_str(&format!("text_length: {}\n", doc.body.text_length()));
        }
    }
    output.push_str("---\n");

    // Body text, or the error message for failed items
    match record {
        ExtractionRecord::Error(error) => output.push_str(&error.error),
        other => {
            if let Some(body) = other.body() {
                output.push_str(body.text());
            }
        }
    }

    output
}

fn format_sitemap_md(result: &SitemapResult) -> String {
    let mut output = String::new();
    output.push_str("---\n");
    output.push_str(&format!("sitemap_url: {}\n", result.sitemap_url));
    output.push_str(&format!("total_urls: {}\n", result.total_urls));
    output.push_str("---\n");
    for url in &result.urls {
        output.push_str(&format!("- {}\n", url));
    }
    output.trim_end().to_string()
}

fn format_structured_md(result: &StructuredResult) -> String {
    let mut output = String::new();
    output.push_str("---\n");
    output.push_str(&format!("url: {}\n", result.url));
    output.push_str("---\n");
    for (name, value) in &result.fields {
        match value {
            serde_json::Value::String(s) => output.push_str(&format!("{}: {}\n", name, s)),
            serde_json::Value::Array(items) => {
                output.push_str(&format!("{}:\n", name));
                for item in items {
                    output.push_str(&format!("  - {}\n", item.as_str().unwrap_or_default()));
                }
            }
            _ => output.push_str(&format!("{}: null\n", name)),
        }
    }
    output.trim_end().to_string()
}

fn format_tool_md(tool: &ToolDetail) -> String {
    let mut output = String::new();
    output.push_str("---\n");
    output.push_str(&format!("name: {}\n", tool.name));
    output.push_str(&format!("url: {}\n", tool.url));
    if !tool.website_url.is_empty() {
        output.push_str(&format!("website_url: {}\n", tool.website_url));
    }
    if !tool.og_image.is_empty() {
        output.push_str(&format!("og_image: {}\n", tool.og_image));
    }
    output.push_str("---\n");
    output.push_str(&format!("# {}\n\n{}\n", tool.name, tool.description));
    if !tool.what_is.is_empty() {
        output.push_str(&format!("\n## What is it\n\n{}\n", tool.what_is));
    }
    for (heading, items) in [
        ("Key Features", &tool.key_features),
        ("Pros", &tool.pros),
        ("Cons", &tool.cons),
    ] {
        if items.is_empty() {
            continue;
        }
        output.push_str(&format!("\n## {}\n\n", heading));
        for item in items {
            output.push_str(&format!("- {}\n", item));
        }
    }
    if !tool.who_uses.is_empty() {
        output.push_str(&format!("\n## Who uses it\n\n{}\n", tool.who_uses));
    }
    output
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
