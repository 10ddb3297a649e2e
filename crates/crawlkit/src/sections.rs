//! Heading-anchored section extraction
//!
//! A section starts at an `h2`/`h3`/`h4` whose normalized text starts with a
//! label and runs over the heading's following siblings until the next
//! `h2`/`h3`/`h4`. All three heading tiers terminate a section equally.
//!
//! Two shapes are supported:
//! - [`list_section`]: items of the first `<ul>`/`<ol>` before any heading.
//! - [`narrative_section`]: paragraph text plus list items (joined with
//!   `"; "`), paragraphs joined with a single space.
//!
//! A label that no heading matches yields an empty result, never an error.

use crate::html::elements_named;
use crate::text::{collapse_whitespace, element_text};
use scraper::{ElementRef, Html};

const SECTION_HEADINGS: &[&str] = &["h2", "h3", "h4"];
const LIST_TAGS: &[&str] = &["ul", "ol"];

/// Case-insensitive, whitespace-collapsed prefix match of a heading against a label
pub fn heading_matches(heading_text: &str, label: &str) -> bool {
    let heading = collapse_whitespace(heading_text).to_lowercase();
    let needle = collapse_whitespace(label).to_lowercase();
    heading.starts_with(&needle)
}

fn is_heading(el: &ElementRef<'_>) -> bool {
    SECTION_HEADINGS.contains(&el.value().name())
}

fn is_list(el: &ElementRef<'_>) -> bool {
    LIST_TAGS.contains(&el.value().name())
}

/// Headings whose text starts with `label`, in document order
fn matching_headings<'a>(document: &'a Html, label: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    elements_named(document.root_element(), SECTION_HEADINGS)
        .filter(move |h| heading_matches(&element_text(*h), label))
}

/// Element siblings following `heading`, stopping before the next section heading
fn section_body<'a>(heading: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|sib| !is_heading(sib))
}

/// Non-empty text of every `<li>` under `list`
fn list_items(list: ElementRef<'_>) -> Vec<String> {
    elements_named(list, &["li"])
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Items of the first list following a heading labelled `label`
///
/// A heading reached before any list ends the search with an empty result.
/// A matching heading with neither a list nor a later heading among its
/// siblings is skipped in favour of the next matching heading.
pub fn list_section(document: &Html, label: &str) -> Vec<String> {
    for heading in matching_headings(document, label) {
        for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
            if is_heading(&sibling) {
                return Vec::new();
            }
            if is_list(&sibling) {
                return list_items(sibling);
            }
        }
    }
    Vec::new()
}

/// Paragraph and list text following the first heading labelled `label`
pub fn narrative_section(document: &Html, label: &str) -> String {
    let Some(heading) = matching_headings(document, label).next() else {
        return String::new();
    };

    let mut parts = Vec::new();
    for sibling in section_body(heading) {
        match sibling.value().name() {
            "p" => {
                let text = element_text(sibling);
                if !text.is_empty() {
                    parts.push(text);
                }
            }
            "ul" | "ol" => {
                let items = list_items(sibling);
                if !items.is_empty() {
                    parts.push(items.join("; "));
                }
            }
            _ => {}
        }
    }
    parts.join(" ").trim().to_string()
}
