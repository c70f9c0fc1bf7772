//! Structured page extraction
//!
//! Turns one (URL, HTML) pair into a [`PageRecord`]. This is a total
//! function: malformed or absent markup degrades to empty strings and empty
//! sequences, never an error. It performs no network or filesystem I/O, so
//! it is independently unit-testable.

mod media;

pub use media::{extract_media_links, is_media_file, MediaCategory};

use chrono::Utc;
use scraper::{Html, Selector};
use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

/// Cap on stored headings
const MAX_HEADINGS: usize = 20;

/// Cap on stored paragraphs
const MAX_PARAGRAPHS: usize = 10;

/// Cap on link text length, in characters
const MAX_LINK_TEXT: usize = 100;

/// One anchor as found on the page
///
/// The href is kept verbatim; resolution to absolute URLs happens only for
/// the crawl's traversal decisions, not for the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// Structured extraction result for one fetched page
///
/// Immutable once produced; the crawl engine only aggregates records, it
/// never rewrites them.
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub description: String,
    pub headings: Vec<String>,
    pub links: Vec<Link>,
    pub paragraphs: Vec<String>,
    pub media: BTreeMap<MediaCategory, Vec<String>>,
    pub timestamp: String,
}

/// Formats the current UTC time as ISO-8601 with a trailing `Z`
pub(crate) fn utc_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Extracts a structured record from one page
///
/// # Arguments
///
/// * `url` - The page URL, used for the record and for resolving media
/// * `html` - The raw HTML text
///
/// # Returns
///
/// A [`PageRecord`]; never fails. Absent fields come back empty.
pub fn extract(url: &Url, html: &str) -> PageRecord {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let description = extract_description(&document);
    let headings = extract_headings(&document);
    let links = extract_links(&document);
    let paragraphs = extract_paragraphs(&document);

    let mut media = BTreeMap::new();
    for category in MediaCategory::ALL {
        media.insert(category, extract_media_links(&document, url, category));
    }

    PageRecord {
        url: url.to_string(),
        title,
        description,
        headings,
        links,
        paragraphs,
        media,
        timestamp: utc_timestamp(),
    }
}

/// Extracts the page title, trimmed; empty string if absent
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extracts the meta description content, trimmed; empty string if absent
fn extract_description(document: &Html) -> String {
    let Ok(selector) = Selector::parse(r#"meta[name="description"]"#) else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

/// Extracts h1/h2/h3 text in document order, first 20
fn extract_headings(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("h1, h2, h3") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .take(MAX_HEADINGS)
        .collect()
}

/// Extracts every anchor with an href, in document order
///
/// Hrefs are stored verbatim (including cross-host and fragment links);
/// visible text is truncated to 100 characters.
fn extract_links(document: &Html) -> Vec<Link> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            let text: String = element
                .text()
                .collect::<String>()
                .trim()
                .chars()
                .take(MAX_LINK_TEXT)
                .collect();
            Some(Link {
                text,
                href: href.to_string(),
            })
        })
        .collect()
}

/// Extracts non-empty paragraph text in document order, first 10
fn extract_paragraphs(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("p") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .take(MAX_PARAGRAPHS)
        .collect()
}
