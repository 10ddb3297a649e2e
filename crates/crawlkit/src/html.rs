//! HTML semantic extraction
//!
//! Reduces an HTML document to title, description, visible body text and
//! outbound links. The heading-anchored section rules live in
//! [`sections`](crate::sections).

use crate::text::{element_text, visible_text};
use crate::types::{HtmlPage, TextBody};
use scraper::{ElementRef, Html};
use std::collections::HashSet;
use std::path::Path;
use url::Url;

/// Maximum number of links kept per page
pub const MAX_LINKS: usize = 50;

/// Elements under `root` (inclusive) whose tag is one of `names`, in document order
pub fn elements_named<'a>(
    root: ElementRef<'a>,
    names: &'a [&'a str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(move |el| names.contains(&el.value().name()))
}

/// Which attribute a meta tag is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKey {
    /// `<meta property="...">` (OpenGraph)
    Property,
    /// `<meta name="...">`
    Name,
}

impl MetaKey {
    fn attr(self) -> &'static str {
        match self {
            MetaKey::Property => "property",
            MetaKey::Name => "name",
        }
    }
}

/// Trimmed `content` of the first meta tag keyed `key`, or empty
pub fn meta_content(document: &Html, by: MetaKey, key: &str) -> String {
    elements_named(document.root_element(), &["meta"])
        .find(|el| el.value().attr(by.attr()) == Some(key))
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

/// Whitespace-collapsed text of the first `<tag>` element, or empty
pub fn first_tag_text(document: &Html, tag: &str) -> String {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == tag)
        .map(element_text)
        .unwrap_or_default()
}

pub(crate) fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

/// Page title: `<h1>` text, falling back to `<title>`
pub fn page_title(document: &Html) -> String {
    non_empty(first_tag_text(document, "h1"))
        .or_else(|| non_empty(first_tag_text(document, "title")))
        .unwrap_or_default()
}

/// Page description: `og:description`, falling back to meta `description`
pub fn page_description(document: &Html) -> String {
    non_empty(meta_content(document, MetaKey::Property, "og:description"))
        .or_else(|| non_empty(meta_content(document, MetaKey::Name, "description")))
        .unwrap_or_default()
}

/// Visible text of `<main>`, `<article>` or `<body>`, else the whole document
pub fn main_text(document: &Html) -> String {
    let root = document.root_element();
    let region = ["main", "article", "body"]
        .iter()
        .find_map(|tag| {
            root.descendants()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == *tag)
        })
        .unwrap_or(root);
    visible_text(region)
}

/// Resolve every anchor against `origin`, de-duplicated, capped at [`MAX_LINKS`]
pub fn page_links(document: &Html, origin: &str) -> Vec<String> {
    let base = base_url(origin);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for href in elements_named(document.root_element(), &["a"])
        .filter_map(|a| a.value().attr("href"))
    {
        let resolved = resolve_href(base.as_ref(), href);
        if !seen.insert(resolved.clone()) {
            continue;
        }
        links.push(resolved);
        if links.len() >= MAX_LINKS {
            break;
        }
    }

    links
}

/// Parse `origin` as a URL, or as an absolute filesystem path
fn base_url(origin: &str) -> Option<Url> {
    Url::parse(origin)
        .ok()
        .or_else(|| Url::from_file_path(Path::new(origin)).ok())
}

fn resolve_href(base: Option<&Url>, href: &str) -> String {
    let href = href.trim();
    match base {
        Some(base) => base
            .join(href)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| href.to_string()),
        None => Url::parse(href)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| href.to_string()),
    }
}

/// Extract the general page record from an HTML document
pub fn extract_page(html: &str, origin: &str) -> HtmlPage {
    let document = Html::parse_document(html);
    extract_page_from(&document, origin)
}

pub(crate) fn extract_page_from(document: &Html, origin: &str) -> HtmlPage {
    HtmlPage {
        url: origin.to_string(),
        title: page_title(document),
        description: page_description(document),
        body: TextBody::new(main_text(document)),
        links: page_links(document, origin),
    }
}

/// Case-insensitive check for an HTML document opener anywhere in `text`
pub fn looks_like_html(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("<html") || lower.contains("<!doctype html")
}
