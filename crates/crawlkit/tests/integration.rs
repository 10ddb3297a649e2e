//! Integration tests for CrawlKit using wiremock

use crawlkit::{
    crawl_file, crawl_many, crawl_sitemap, crawl_url, extract_structured, CrawlError,
    CrawlOptions, ExtractionRecord, Tool,
};
use serde_json::json;
use std::io::{Cursor, Write};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Fallback title</title>
    <meta property="og:description" content="Open graph description">
    <meta name="description" content="Plain description">
    <style>.hidden { display: none }</style>
</head>
<body>
    <h1>Main  heading</h1>
    <script>var ignored = true;</script>
    <p>Some <strong>body</strong> text.</p>
    <a href="/about">About</a>
    <a href="/about">About again</a>
    <a href="https://other.example/x">Other</a>
    <a href="mailto:someone@example.com">Mail</a>
</body>
</html>"#;

fn options() -> CrawlOptions {
    CrawlOptions::default()
}

/// Show library logs when running with RUST_LOG set
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_crawl_url_html() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE, "text/html; charset=utf-8"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/page", mock_server.uri());
    let record = crawl_url(&url, TIMEOUT, &options()).await.unwrap();

    let ExtractionRecord::Html(page) = record else {
        panic!("expected html record");
    };
    assert_eq!(page.url, url);
    assert_eq!(page.title, "Main heading");
    assert_eq!(page.description, "Open graph description");
    assert!(page.body.text().contains("Some body text."));
    assert!(!page.body.text().contains("ignored"));
    assert_eq!(page.body.text_length(), page.body.text().chars().count());
    assert_eq!(
        page.links,
        vec![
            format!("{}/about", mock_server.uri()),
            "https://other.example/x".to_string(),
            "mailto:someone@example.com".to_string(),
        ]
    );

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].headers.get("accept").unwrap(),
        "application/json,text/html;q=0.9,*/*;q=0.8"
    );
    assert_eq!(
        requests[0].headers.get("user-agent").unwrap(),
        crawlkit::DEFAULT_USER_AGENT
    );
}

#[tokio::test]
async fn test_crawl_url_non_html() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page.html"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![0u8; 42], "application/octet-stream"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/page.html", mock_server.uri());
    let record = crawl_url(&url, TIMEOUT, &options()).await.unwrap();

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "non-html",
            "url": url,
            "content_type": "application/octet-stream",
            "size_bytes": 42
        })
    );
}

#[tokio::test]
async fn test_crawl_url_custom_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", "TestAgent/2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>ok</p>", "text/html"))
        .mount(&mock_server)
        .await;

    let options = CrawlOptions {
        user_agent: Some("TestAgent/2.0".to_string()),
        ..Default::default()
    };
    let record = crawl_url(&format!("{}/", mock_server.uri()), TIMEOUT, &options)
        .await
        .unwrap();
    assert_eq!(record.kind(), "html");
}

#[tokio::test]
async fn test_crawl_url_4xx_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());
    let err = crawl_url(&url, TIMEOUT, &options()).await.unwrap_err();
    assert!(matches!(err, CrawlError::Status { status: 404, .. }));
    assert!(err.is_fetch());
}

#[tokio::test]
async fn test_crawl_url_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<p>late</p>", "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let err = crawl_url(&mock_server.uri(), Duration::from_secs(1), &options())
        .await
        .unwrap_err();
    assert!(matches!(err, CrawlError::Timeout));
}

#[tokio::test]
async fn test_crawl_many_isolates_failures() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE, "text/html"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let urls = vec![
        format!("{}/ok", mock_server.uri()),
        "not a url".to_string(),
        format!("{}/broken", mock_server.uri()),
    ];
    let records = crawl_many(&urls, TIMEOUT, &options()).await;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].kind(), "html");
    assert_eq!(records[1].kind(), "error");
    assert_eq!(records[1].origin(), "not a url");
    assert_eq!(records[2].kind(), "error");

    let value = serde_json::to_value(&records[2]).unwrap();
    assert_eq!(value["url"], urls[2]);
    assert!(value["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn test_crawl_sitemap_with_limit() {
    let mock_server = MockServer::start().await;

    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
    <url><loc>https://a/1</loc></url>
    <url><loc> https://a/2 </loc></url>
</urlset>"#;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(xml, "application/xml"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/sitemap.xml", mock_server.uri());
    let result = crawl_sitemap(&url, 1, TIMEOUT, &options()).await.unwrap();

    assert_eq!(result.sitemap_url, url);
    assert_eq!(result.total_urls, 2);
    assert_eq!(result.urls, vec!["https://a/1"]);
}

#[tokio::test]
async fn test_crawl_sitemap_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<urlset><loc>x</urlset>", "text/xml"),
        )
        .mount(&mock_server)
        .await;

    let err = crawl_sitemap(&mock_server.uri(), 20, TIMEOUT, &options())
        .await
        .unwrap_err();
    assert!(matches!(err, CrawlError::Parse(_)));
}

#[tokio::test]
async fn test_extract_structured() {
    let mock_server = MockServer::start().await;

    let html = r#"<html><body>
        <h1>X</h1>
        <ul><li>one</li><li> two </li><li></li></ul>
    </body></html>"#;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(&mock_server)
        .await;

    let url = mock_server.uri();
    let result = extract_structured(&url, r#"{"title": "h1"}"#, TIMEOUT, &options())
        .await
        .unwrap();
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"url": url, "fields": {"title": "X"}})
    );

    let result = extract_structured(
        &url,
        r#"{"items": ["li"], "missing": "h2", "bad": 7, "pair": ["a", "b"]}"#,
        TIMEOUT,
        &options(),
    )
    .await
    .unwrap();
    assert_eq!(
        serde_json::Value::Object(result.fields),
        json!({"items": ["one", "two"], "missing": "", "bad": null, "pair": null})
    );
}

#[tokio::test]
async fn test_crawl_file_local_formats() {
    let dir = tempfile::tempdir().unwrap();

    let txt = dir.path().join("notes.txt");
    std::fs::write(&txt, "line one\n\n   line two\t").unwrap();
    let record = crawl_file(txt.to_str().unwrap(), TIMEOUT, &options())
        .await
        .unwrap();
    assert_eq!(record.kind(), "text");
    assert_eq!(record.body().unwrap().text(), "line one line two");

    let md = dir.path().join("README.md");
    std::fs::write(&md, "# Title\n\nBody").unwrap();
    let record = crawl_file(md.to_str().unwrap(), TIMEOUT, &options())
        .await
        .unwrap();
    assert_eq!(record.kind(), "markdown");

    let html = dir.path().join("saved_page");
    std::fs::write(
        &html,
        "<html><head><title>Saved</title></head><body><a href=\"other.html\">o</a></body></html>",
    )
    .unwrap();
    let source = html.to_str().unwrap();
    let record = crawl_file(source, TIMEOUT, &options()).await.unwrap();
    let ExtractionRecord::HtmlFile(page) = record else {
        panic!("expected html-file record");
    };
    assert_eq!(page.title, "Saved");
    assert_eq!(page.url, source);
    assert_eq!(page.links.len(), 1);
    assert!(page.links[0].starts_with("file://"));
    assert!(page.links[0].ends_with("/other.html"));
}

#[tokio::test]
async fn test_crawl_file_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.pdf");

    let err = crawl_file(missing.to_str().unwrap(), TIMEOUT, &options())
        .await
        .unwrap_err();
    assert!(matches!(err, CrawlError::NotFound(_)));
}

#[tokio::test]
async fn test_crawl_file_docx() {
    let dir = tempfile::tempdir().unwrap();
    let docx = dir.path().join("letter.docx");
    std::fs::write(
        &docx,
        docx_with_body(
            "<w:p><w:r><w:t>Dear reader,</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Thanks</w:t><w:br/><w:t>again</w:t></w:r></w:p>",
        ),
    )
    .unwrap();

    let record = crawl_file(docx.to_str().unwrap(), TIMEOUT, &options())
        .await
        .unwrap();
    assert_eq!(record.kind(), "docx");
    assert_eq!(record.body().unwrap().text(), "Dear reader, Thanks again");
}

#[tokio::test]
async fn test_crawl_file_pdf_skips_blank_page() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("report.pdf");
    std::fs::write(&pdf, pdf_with_pages(&[Some("Alpha"), None, Some("Gamma")])).unwrap();

    let record = crawl_file(pdf.to_str().unwrap(), TIMEOUT, &options())
        .await
        .unwrap();
    assert_eq!(record.kind(), "pdf");

    let text = record.body().unwrap().text();
    let alpha = text.find("Alpha").unwrap();
    let gamma = text.find("Gamma").unwrap();
    assert!(alpha < gamma);
    assert!(!text.contains("  "));
}

#[tokio::test]
async fn test_crawl_file_malformed_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("broken.pdf");
    std::fs::write(&pdf, b"definitely not a pdf").unwrap();

    let err = crawl_file(pdf.to_str().unwrap(), TIMEOUT, &options())
        .await
        .unwrap_err();
    assert!(matches!(err, CrawlError::Decode { format: "pdf", .. }));
}

#[tokio::test]
async fn test_crawl_file_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/data.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("a,b\n1,2\n", "text/csv"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/files/data.csv?download=1", mock_server.uri());
    let record = crawl_file(&url, TIMEOUT, &options()).await.unwrap();
    assert_eq!(record.kind(), "text");
    assert_eq!(record.origin(), url);
    assert_eq!(record.body().unwrap().text(), "a,b 1,2");
}

const TOOL_PAGE: &str = r#"<html><head>
    <meta property="og:description" content="Drafts emails.">
    <meta property="og:image" content="https://cdn.example/mailer.png">
</head><body>
    <h1>Mailer</h1>
    <h2>What is Mailer?</h2>
    <p>An assistant for email.</p>
    <ul><li>Drafts</li><li>Replies</li></ul>
    <h3>Key Features</h3>
    <ul><li>Templates</li><li>Tone control</li></ul>
    <h3>Pros</h3>
    <ul><li>Fast</li></ul>
    <h3>Cons</h3>
    <p>Nothing listed.</p>
    <h3>Who is using Mailer?</h3>
    <p>Sales teams.</p>
</body></html>"#;

#[tokio::test]
async fn test_random_tool_flow() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_json(json!({"query": "", "page": 1, "sort": "new"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "slug": {"current": "mailer"},
                "toolName": "Mailer listing",
                "toolShortDescription": "Listing description",
                "websiteUrl": "https://mailer.example"
            }]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tool/mailer"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TOOL_PAGE, "text/html"))
        .mount(&mock_server)
        .await;

    let tool = Tool::builder()
        .search_api_url(format!("{}/api/search", mock_server.uri()))
        .tool_base_url(format!("{}/tool/", mock_server.uri()))
        .build();

    let detail = tool.random_tool().await.unwrap();
    assert_eq!(detail.name, "Mailer");
    assert_eq!(detail.description, "Drafts emails.");
    assert_eq!(detail.url, format!("{}/tool/mailer", mock_server.uri()));
    assert_eq!(detail.website_url, "https://mailer.example");
    assert_eq!(detail.what_is, "An assistant for email. Drafts; Replies");
    assert_eq!(detail.key_features, vec!["Templates", "Tone control"]);
    assert_eq!(detail.pros, vec!["Fast"]);
    assert!(detail.cons.is_empty());
    assert_eq!(detail.who_uses, "Sales teams.");
    assert_eq!(detail.og_image, "https://cdn.example/mailer.png");

    let value = tool
        .call("random_tools", json!({"count": 0}))
        .await
        .unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_random_tool_empty_directory() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&mock_server)
        .await;

    let tool = Tool::builder()
        .search_api_url(format!("{}/api/search", mock_server.uri()))
        .build();

    let err = tool.random_tools(3).await.unwrap_err();
    assert!(matches!(err, CrawlError::Directory(_)));
}

#[tokio::test]
async fn test_random_tool_missing_description() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"slug": "bare"}]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tool/bare"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<h1>Bare</h1><p>No meta.</p>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let tool = Tool::builder()
        .search_api_url(format!("{}/api/search", mock_server.uri()))
        .tool_base_url(format!("{}/tool/", mock_server.uri()))
        .build();

    let err = tool.random_tool().await.unwrap_err();
    assert!(matches!(err, CrawlError::MissingField("description")));
}

#[tokio::test]
async fn test_tool_call_crawl_sitemap_clamps_limit() {
    let mock_server = MockServer::start().await;

    let locs: String = (0..250)
        .map(|i| format!("<url><loc>https://a/{}</loc></url>", i))
        .collect();
    let xml = format!("<urlset>{}</urlset>", locs);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(xml, "application/xml"))
        .mount(&mock_server)
        .await;

    let value = Tool::default()
        .call(
            "crawl_sitemap",
            json!({"sitemap_url": mock_server.uri(), "limit": 1000}),
        )
        .await
        .unwrap();
    assert_eq!(value["total_urls"], 250);
    assert_eq!(value["urls"].as_array().unwrap().len(), 200);
}

/// Wrap body XML in a minimal DOCX container
fn docx_with_body(body: &str) -> Vec<u8> {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

/// Build a PDF with one page per entry; `None` makes a page with no text
fn pdf_with_pages(pages: &[Option<&str>]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let operations = match page {
            Some(text) => vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
            None => vec![],
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
