//! Media reference extraction
//!
//! This module categorizes media references found on a page:
//! - `images`, `videos`, `audio` are recognized by tag/attribute shape
//! - `documents`, `archives`, `ebooks` are recognized by anchor href suffix
//!
//! All references are resolved to absolute URLs against the page URL and
//! deduplicated in first-discovered order, so the selection is deterministic
//! when a later cap truncates the list.

use scraper::{Html, Selector};
use serde::Serialize;
use std::collections::HashSet;
use url::Url;

/// Category of a media reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Images,
    Videos,
    Audio,
    Documents,
    Archives,
    Ebooks,
}

impl MediaCategory {
    /// All categories, in envelope order
    pub const ALL: [MediaCategory; 6] = [
        MediaCategory::Images,
        MediaCategory::Videos,
        MediaCategory::Audio,
        MediaCategory::Documents,
        MediaCategory::Archives,
        MediaCategory::Ebooks,
    ];

    /// File-extension suffixes registered for this category
    ///
    /// The tag-recognized categories carry their conventional extensions too,
    /// but only the anchor-scanned categories consult this table.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            MediaCategory::Images => &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"],
            MediaCategory::Videos => &[".mp4", ".webm", ".avi", ".mov"],
            MediaCategory::Audio => &[".mp3", ".ogg", ".wav", ".flac", ".m4a"],
            MediaCategory::Documents => {
                &[".pdf", ".epub", ".docx", ".txt", ".doc", ".xls", ".xlsx"]
            }
            MediaCategory::Archives => &[".zip", ".rar", ".7z", ".tar", ".gz"],
            MediaCategory::Ebooks => &[".mobi", ".azw3", ".azw"],
        }
    }
}

/// Checks whether a URL ends with one of the category's extensions
///
/// The comparison is case-insensitive and runs against the raw href, before
/// resolution, so `FILE.PDF` and `file.pdf` both match.
pub fn is_media_file(url: &str, extensions: &[&str]) -> bool {
    let lower = url.to_lowercase();
    extensions.iter().any(|ext| lower.ends_with(ext))
}

/// Extracts the media references of one category from a parsed document
///
/// # Arguments
///
/// * `document` - The parsed HTML document
/// * `base_url` - The page URL, used to resolve relative references
/// * `category` - Which category to collect
///
/// # Returns
///
/// Absolute URLs in first-discovered order, deduplicated
pub fn extract_media_links(
    document: &Html,
    base_url: &Url,
    category: MediaCategory,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();
    let mut push = |raw: &str| {
        if let Ok(absolute) = base_url.join(raw) {
            let absolute = absolute.to_string();
            if seen.insert(absolute.clone()) {
                links.push(absolute);
            }
        }
    };

    match category {
        MediaCategory::Images => {
            if let Ok(selector) = Selector::parse("img, source") {
                for element in document.select(&selector) {
                    for attr in ["src", "data-src"] {
                        if let Some(src) = element.value().attr(attr) {
                            push(src);
                        }
                    }
                }
            }
            if let Ok(selector) = Selector::parse("meta[content]") {
                for element in document.select(&selector) {
                    if let Some(content) = element.value().attr("content") {
                        push(content);
                    }
                }
            }
        }

        MediaCategory::Videos | MediaCategory::Audio => {
            let tag = if category == MediaCategory::Videos {
                "video"
            } else {
                "audio"
            };
            let selectors = [format!("{}[src]", tag), format!("{} source[src]", tag)];
            for selector in &selectors {
                if let Ok(selector) = Selector::parse(selector) {
                    for element in document.select(&selector) {
                        if let Some(src) = element.value().attr("src") {
                            push(src);
                        }
                    }
                }
            }
        }

        MediaCategory::Documents | MediaCategory::Archives | MediaCategory::Ebooks => {
            if let Ok(selector) = Selector::parse("a[href]") {
                for element in document.select(&selector) {
                    if let Some(href) = element.value().attr("href") {
                        if is_media_file(href, category.extensions()) {
                            push(href);
                        }
                    }
                }
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/dir/page.html").unwrap()
    }

    fn collect(html: &str, category: MediaCategory) -> Vec<String> {
        let document = Html::parse_document(html);
        extract_media_links(&document, &base(), category)
    }

    #[test]
    fn test_is_media_file_case_insensitive() {
        assert!(is_media_file(
            "/files/REPORT.PDF",
            MediaCategory::Documents.extensions()
        ));
        assert!(is_media_file(
            "/music/song.mp3",
            MediaCategory::Audio.extensions()
        ));
        assert!(!is_media_file(
            "/page.html",
            MediaCategory::Documents.extensions()
        ));
    }

    #[test]
    fn test_images_from_img_and_source() {
        let html = r#"<img src="/a.png"><picture><source data-src="b.jpg"></picture>"#;
        let links = collect(html, MediaCategory::Images);
        assert_eq!(
            links,
            vec![
                "https://example.com/a.png".to_string(),
                "https://example.com/dir/b.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn test_images_from_meta_content() {
        let html = r#"<meta property="og:image" content="/og.png">"#;
        let links = collect(html, MediaCategory::Images);
        assert_eq!(links, vec!["https://example.com/og.png".to_string()]);
    }

    #[test]
    fn test_images_deduplicated_first_discovered() {
        let html = r#"<img src="/a.png"><img src="/b.png"><img src="/a.png">"#;
        let links = collect(html, MediaCategory::Images);
        assert_eq!(
            links,
            vec![
                "https://example.com/a.png".to_string(),
                "https://example.com/b.png".to_string(),
            ]
        );
    }

    #[test]
    fn test_videos_from_tag_and_nested_source() {
        let html = r#"
            <video src="/clip.mp4"></video>
            <video><source src="/other.webm"></video>
        "#;
        let links = collect(html, MediaCategory::Videos);
        assert_eq!(
            links,
            vec![
                "https://example.com/clip.mp4".to_string(),
                "https://example.com/other.webm".to_string(),
            ]
        );
    }

    #[test]
    fn test_audio_from_tag() {
        let html = r#"<audio src="/song.mp3"></audio>"#;
        let links = collect(html, MediaCategory::Audio);
        assert_eq!(links, vec!["https://example.com/song.mp3".to_string()]);
    }

    #[test]
    fn test_documents_from_anchors() {
        let html = r#"
            <a href="/report.pdf">Report</a>
            <a href="/page.html">Page</a>
            <a href="/sheet.xlsx">Sheet</a>
        "#;
        let links = collect(html, MediaCategory::Documents);
        assert_eq!(
            links,
            vec![
                "https://example.com/report.pdf".to_string(),
                "https://example.com/sheet.xlsx".to_string(),
            ]
        );
    }

    #[test]
    fn test_archives_from_anchors() {
        let html = r#"<a href="backup.tar">Backup</a><a href="x.7z">x</a>"#;
        let links = collect(html, MediaCategory::Archives);
        assert_eq!(
            links,
            vec![
                "https://example.com/dir/backup.tar".to_string(),
                "https://example.com/dir/x.7z".to_string(),
            ]
        );
    }

    #[test]
    fn test_ebooks_from_anchors() {
        let html = r#"<a href="/book.mobi">Book</a><a href="/book.azw3">Book</a>"#;
        let links = collect(html, MediaCategory::Ebooks);
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_empty_document_yields_no_media() {
        for category in MediaCategory::ALL {
            assert!(collect("<html></html>", category).is_empty());
        }
    }
}
