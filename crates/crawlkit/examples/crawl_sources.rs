//! Example: Crawl a few live sources and summarize the records
//!
//! Run with: cargo run -p crawlkit --example crawl_sources
//!
//! Each case goes through `crawl_file`, so the extractor is picked by suffix
//! or by sniffing the payload.

use crawlkit::{crawl_file, CrawlOptions, ExtractionRecord};
use std::time::Duration;

/// Example case definition
struct Case {
    source: &'static str,
    description: &'static str,
    expect_type: &'static str,
    expect_contains: Option<&'static str>,
}

const CASES: &[Case] = &[
    Case {
        source: "https://example.com",
        description: "HTML page without suffix (sniffed)",
        expect_type: "html-file",
        expect_contains: Some("Example Domain"),
    },
    Case {
        source: "https://raw.githubusercontent.com/rust-lang/rust/master/README.md",
        description: "Raw markdown file",
        expect_type: "markdown",
        expect_contains: Some("Rust"),
    },
    Case {
        source: "https://www.w3.org/WAI/ER/tests/xhtml/testfiles/resources/pdf/dummy.pdf",
        description: "Small PDF",
        expect_type: "pdf",
        expect_contains: Some("Dummy"),
    },
];

#[tokio::main]
async fn main() {
    println!("CrawlKit Source Examples");
    println!("========================\n");

    let options = CrawlOptions::default();
    let mut passed = 0;
    let mut failed = 0;

    for (i, case) in CASES.iter().enumerate() {
        println!("{}. {}", i + 1, case.description);
        println!("   Source: {}", case.source);

        match crawl_file(case.source, Duration::from_secs(30), &options).await {
            Ok(record) => {
                print_summary(&record);
                if check_expectations(case, &record) {
                    println!("   ✓ PASS\n");
                    passed += 1;
                } else {
                    println!("   ✗ FAIL (expectations not met)\n");
                    failed += 1;
                }
            }
            Err(e) => {
                println!("   Error: {}", e);
                println!("   ✗ FAIL\n");
                failed += 1;
            }
        }
    }

    println!("========================");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed > 0 {
        std::process::exit(1);
    }
}

fn print_summary(record: &ExtractionRecord) {
    println!("   Type: {}", record.kind());

    if let ExtractionRecord::Html(page) | ExtractionRecord::HtmlFile(page) = record {
        println!("   Title: {}", page.title);
        println!("   Links: {}", page.links.len());
    }

    if let Some(body) = record.body() {
        let preview: String = body.text().chars().take(100).collect();
        println!(
            "   Preview: {}{}",
            preview,
            if body.text_length() > 100 { "..." } else { "" }
        );
    }
}

fn check_expectations(case: &Case, record: &ExtractionRecord) -> bool {
    if record.kind() != case.expect_type {
        println!(
            "   Expected type '{}', got '{}'",
            case.expect_type,
            record.kind()
        );
        return false;
    }

    if let Some(expected_text) = case.expect_contains {
        let text = record.body().map(|b| b.text()).unwrap_or_default();
        if !text.contains(expected_text) {
            println!("   Expected text to contain '{}'", expected_text);
            return false;
        }
    }

    true
}
