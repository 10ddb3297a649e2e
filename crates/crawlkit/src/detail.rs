//! Tool-detail page extraction
//!
//! Stricter sibling of [`extract_page`](crate::html::extract_page) for single
//! tool pages of a tool directory. Unlike the general page extractor, a
//! description is mandatory here: a page with no `og:description`, no meta
//! `description` and no listing fallback fails with
//! [`CrawlError::MissingField`].

use crate::error::CrawlError;
use crate::html::{first_tag_text, meta_content, non_empty, MetaKey};
use crate::sections::{list_section, narrative_section};
use crate::types::{ToolDetail, ToolListing};
use scraper::Html;

const WHAT_IS: &str = "what is";
const KEY_FEATURES: &str = "Key Features";
const PROS: &str = "Pros";
const CONS: &str = "Cons";
const WHO_USES: &str = "Who is Using";

/// Extract a tool-detail record from `html`, filling gaps from `listing`
pub fn extract_tool_page(
    html: &str,
    listing: &ToolListing,
    url: &str,
) -> Result<ToolDetail, CrawlError> {
    let document = Html::parse_document(html);

    let name = non_empty(first_tag_text(&document, "h1"))
        .or_else(|| non_empty(meta_content(&document, MetaKey::Property, "og:title")))
        .unwrap_or_else(|| listing.name.clone());

    let description = non_empty(meta_content(&document, MetaKey::Property, "og:description"))
        .or_else(|| non_empty(meta_content(&document, MetaKey::Name, "description")))
        .or_else(|| non_empty(listing.short_description.clone()))
        .ok_or(CrawlError::MissingField("description"))?;

    Ok(ToolDetail {
        name,
        description,
        url: url.to_string(),
        website_url: listing.website_url.clone(),
        what_is: narrative_section(&document, WHAT_IS),
        key_features: list_section(&document, KEY_FEATURES),
        pros: list_section(&document, PROS),
        cons: list_section(&document, CONS),
        who_uses: narrative_section(&document, WHO_USES),
        og_image: meta_content(&document, MetaKey::Property, "og:image"),
    })
}
