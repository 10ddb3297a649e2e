//! Sitemap XML parsing
//!
//! Collects the text of every `loc` element regardless of namespace prefix,
//! so `urlset` documents, sitemap indexes and prefixed variants
//! (`<s:loc>`) all work.

use crate::error::CrawlError;
use crate::types::SitemapResult;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Lower and upper bound applied to the caller's limit
pub const MIN_LIMIT: usize = 1;
pub const MAX_LIMIT: usize = 200;

fn is_loc(local_name: &[u8]) -> bool {
    local_name.eq_ignore_ascii_case(b"loc")
}

/// Parse sitemap XML and return every `loc` value in document order
///
/// Values are trimmed. A `loc` holding only whitespace yields `""`;
/// `<loc/>` and `<loc></loc>` carry no text and are skipped.
pub fn parse_locs(xml: &[u8]) -> Result<Vec<String>, CrawlError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut locs = Vec::new();
    let mut depth: usize = 0;
    let mut seen_root = false;
    // Depth of the innermost open `loc`, and the text gathered inside it
    let mut loc_depth: Option<usize> = None;
    let mut current = String::new();
    let mut saw_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if depth == 0 && seen_root {
                    return Err(CrawlError::Parse("multiple root elements".to_string()));
                }
                seen_root = true;
                depth += 1;
                if loc_depth.is_none() && is_loc(e.local_name().as_ref()) {
                    loc_depth = Some(depth);
                    current.clear();
                    saw_text = false;
                }
            }
            Ok(Event::Empty(_)) => {
                if depth == 0 && seen_root {
                    return Err(CrawlError::Parse("multiple root elements".to_string()));
                }
                seen_root = true;
            }
            Ok(Event::End(_)) => {
                if loc_depth == Some(depth) {
                    if saw_text {
                        locs.push(current.trim().to_string());
                    }
                    loc_depth = None;
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(e)) => {
                if loc_depth.is_some() {
                    let text = e.unescape().map_err(|e| CrawlError::Parse(e.to_string()))?;
                    current.push_str(&text);
                    saw_text |= !text.is_empty();
                } else if depth == 0 && !e.iter().all(u8::is_ascii_whitespace) {
                    return Err(CrawlError::Parse(
                        "text outside the root element".to_string(),
                    ));
                }
            }
            Ok(Event::CData(e)) => {
                if loc_depth.is_some() {
                    current.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    saw_text = true;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(CrawlError::Parse(format!(
                    "at position {}: {}",
                    reader.error_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(CrawlError::Parse("no root element".to_string()));
    }
    if depth != 0 {
        return Err(CrawlError::Parse("unexpected end of document".to_string()));
    }

    Ok(locs)
}

/// Build the sitemap result for `locs`, keeping a prefix of at most `limit`
///
/// `limit` is clamped to [`MIN_LIMIT`, `MAX_LIMIT`].
pub fn sitemap_result(sitemap_url: &str, locs: Vec<String>, limit: usize) -> SitemapResult {
    let limit = limit.clamp(MIN_LIMIT, MAX_LIMIT);
    let total_urls = locs.len();
    let mut urls = locs;
    urls.truncate(limit);
    SitemapResult {
        sitemap_url: sitemap_url.to_string(),
        total_urls,
        urls,
    }
}

/// Parse sitemap bytes and apply `limit`
pub fn extract_sitemap(
    sitemap_url: &str,
    xml: &[u8],
    limit: usize,
) -> Result<SitemapResult, CrawlError> {
    let locs = parse_locs(xml)?;
    tracing::debug!(url = %sitemap_url, total = locs.len(), "Parsed sitemap");
    Ok(sitemap_result(sitemap_url, locs, limit))
}
