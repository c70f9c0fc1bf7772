//! Page-Harvest: a polite page scraper and site crawler
//!
//! This crate fetches web pages and extracts structured content (title,
//! description, headings, links, paragraphs, categorized media references),
//! either for a single URL or across a bounded breadth-first crawl of one
//! site, respecting robots.txt unless told otherwise.

pub mod config;
pub mod crawler;
pub mod dispatch;
pub mod extract;
pub mod fetcher;
pub mod robots;

use thiserror::Error;

/// Main error type for Page-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("url required")]
    MissingUrl,

    #[error("unknown mode")]
    UnknownMode(String),

    #[error(transparent)]
    Fetch(#[from] fetcher::FetchError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Page-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

// Re-export commonly used types
pub use config::{CrawlOptions, FetcherConfig};
pub use crawler::{CrawlEngine, CrawlResult};
pub use extract::{extract, MediaCategory, PageRecord};
pub use fetcher::{build_http_client, fetch, FetchError};
pub use robots::{PolicyUnavailable, RobotsGate};
